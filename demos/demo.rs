use argsparse::Registry;

fn main() -> Result<(), argsparse::RegistryError> {
    let mut registry = Registry::new("argsparse-example");
    registry.add_int("integer", "This is an integer value", 0)?;
    registry.add_double("double", "This is a double value", 0.0)?;
    registry.add_str("string", "This is a string value", "default")?;
    registry.add_flag("flag", "This is a flag value", 1, None)?;
    registry.add_help()?;

    let supplied = registry.parse();
    println!(
        "shortopts {} - {supplied} arguments parsed",
        registry.shortopts()
    );

    for short in ['i', 's'] {
        if let Some(argument) = registry.argument_by_short_name(short) {
            println!(
                "long: {} short: '{}' value: {}",
                argument.name(),
                argument.short(),
                argument.value()
            );
        }
    }
    Ok(())
}
