use std::env;
use std::fmt::Debug;
use std::str::FromStr;

/// Returns the value of the named environment variable if it exists or panics.
pub fn get_variable(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("must define {} environment variable", name))
}

/// Parses the named environment variable or panics.
pub fn parse_variable<T>(name: &str) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    let value = get_variable(name);

    value
        .parse()
        .unwrap_or_else(|e| panic!("parse {} ({:?}): {:?}", name, value, e))
}

/// Parses the named environment variable, falling back to `default`
/// if it is not set. Panics if it is set but cannot be parsed.
pub fn get_variable_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|e| panic!("parse {} ({:?}): {:?}", name, value, e)),
        Err(_) => default,
    }
}
