use crate::registry::Registry;

impl Registry {
    /// Render the usage banner.
    ///
    /// `program_path` may be a full invocation path; only the final component after the last `/`
    /// or `\` appears in the header.
    /// Every registered alias appears bracketed in the header, in registration order, followed by
    /// the title line and one block per option.
    /// Value-taking options also show their type tag and current value.
    pub fn render_usage(&self, program_path: &str) -> String {
        let program = match program_path.rsplit(['/', '\\']).next() {
            Some(component) => component,
            None => unreachable!("internal error - rsplit always yields at least one component"),
        };

        let mut out = String::from("usage: ");
        out.push_str(program);
        for option in self.options() {
            out.push_str(&format!(" [-{}]", option.short()));
        }
        out.push('\n');
        out.push_str(&format!("title: {}\n", self.title()));
        out.push_str("optional arguments:\n");

        for option in self.options() {
            out.push_str(&format!("-{}, --{}\n", option.short(), option.name()));
            out.push_str(&format!("    desc: {}\n", option.description()));
            if option.value().option_type().takes_value() {
                out.push_str(&format!(
                    "    args: [{}:{}]\n",
                    option.value().option_type(),
                    option.value()
                ));
            }
            out.push('\n');
        }

        out
    }

    /// Print the usage banner to stdout.
    pub fn show_usage(&self, program_path: &str) {
        print!("{}", self.render_usage(program_path));
    }

    /// Render every option as a `name = value` line, in registration order.
    pub fn render_arguments(&self) -> String {
        let mut out = String::default();
        for option in self.options() {
            out.push_str(&format!("{} = {}\n", option.name(), option.value()));
        }
        out
    }

    /// Print every option as a `name = value` line to stdout.
    pub fn show_arguments(&self) {
        print!("{}", self.render_arguments());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;

    #[test]
    fn banner_single_string_option() {
        let mut registry = Registry::new("Title");
        registry
            .add_str("string", "This is a string", "defvalue")
            .unwrap();

        assert_eq!(
            registry.render_usage("\\some\\path\\test.exe"),
            "usage: test.exe [-s]\n\
             title: Title\n\
             optional arguments:\n\
             -s, --string\n\
             \x20   desc: This is a string\n\
             \x20   args: [str:defvalue]\n\
             \n"
        );
    }

    #[test]
    fn banner_strips_unix_path() {
        let registry = Registry::new("Title");
        let rendered = registry.render_usage("/usr/local/bin/tool");
        assert_contains!(rendered, "usage: tool\n");
    }

    #[test]
    fn banner_bare_program_name() {
        let registry = Registry::new("Title");
        assert_contains!(registry.render_usage("tool"), "usage: tool\n");
    }

    #[test]
    fn banner_all_aliases_bracketed() {
        let mut registry = Registry::new("Testing version 1.0 - Arguments");
        registry.add_int("integer", "This is an integer", 1234).unwrap();
        registry
            .add_double("double", "This is a double", 1234.4321)
            .unwrap();
        registry.add_flag("flag", "This is a flag", 1, None).unwrap();
        registry.add_help().unwrap();

        let rendered = registry.render_usage("test.exe");
        assert_contains!(rendered, "usage: test.exe [-i] [-d] [-f] [-h]\n");
        assert_contains!(rendered, "title: Testing version 1.0 - Arguments\n");
        assert_contains!(rendered, "-i, --integer\n    desc: This is an integer\n    args: [int:1234]\n");
        assert_contains!(rendered, "-d, --double\n    desc: This is a double\n    args: [dbl:1234.4321]\n");
        // Flags carry no args line.
        assert_contains!(rendered, "-f, --flag\n    desc: This is a flag\n\n");
        assert_contains!(rendered, "-h, --help\n    desc: Show this usage message and exit\n\n");
    }

    #[test]
    fn banner_empty_registry() {
        let registry = Registry::new("Title");
        assert_eq!(
            registry.render_usage("test.exe"),
            "usage: test.exe\ntitle: Title\noptional arguments:\n"
        );
    }

    #[test]
    fn arguments_lines() {
        let mut registry = Registry::new("");
        registry.add_int("integer", "", 1234).unwrap();
        registry.add_str("string", "", "defvalue").unwrap();
        registry.add_flag("flag", "", 1, None).unwrap();

        assert_eq!(
            registry.render_arguments(),
            "integer = 1234\nstring = defvalue\nflag = 0\n"
        );
    }
}
