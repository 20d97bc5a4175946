//! Terminal command parsing.
//!
//! Positions are 1-based as shown on screen: `add` counts catalog rows,
//! every other numbered command counts cart lines.

use std::str::FromStr;

use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Cart,
    Add(usize),
    Remove(usize),
    Quantity(usize, u32),
    Increment(usize),
    Decrement(usize),
    Name(String),
    Email(String),
    Checkout,
    Retry,
    Close,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command `{0}`. Type `help` for a list of commands.")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" | "products" | "catalog" | "back" => Ok(Self::Products),
            "cart" => Ok(Self::Cart),
            "add" => position(rest, "add").map(Self::Add),
            "remove" | "rm" => position(rest, "remove").map(Self::Remove),
            "inc" | "+" => position(rest, "inc").map(Self::Increment),
            "dec" | "-" => position(rest, "dec").map(Self::Decrement),
            "qty" => {
                let mut args = rest.split_whitespace();
                let line_no = position(args.next().unwrap_or_default(), "qty")?;
                let quantity = args.next().ok_or(CommandError::MissingArgument {
                    command: "qty",
                    what: "a line number and a quantity",
                })?;
                let quantity = quantity
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(quantity.to_string()))?;
                Ok(Self::Quantity(line_no, quantity))
            }
            "name" => Ok(Self::Name(rest.to_string())),
            "email" => Ok(Self::Email(rest.to_string())),
            "checkout" => Ok(Self::Checkout),
            "retry" => Ok(Self::Retry),
            "close" => Ok(Self::Close),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn position(arg: &str, command: &'static str) -> Result<usize, CommandError> {
    let arg = arg.split_whitespace().next().ok_or(CommandError::MissingArgument {
        command,
        what: "a number",
    })?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CommandError::InvalidNumber(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!("products".parse(), Ok(Command::Products));
        assert_eq!("  CART ".parse(), Ok(Command::Cart));
        assert_eq!("checkout".parse(), Ok(Command::Checkout));
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn test_numbered_commands() {
        assert_eq!("add 3".parse(), Ok(Command::Add(3)));
        assert_eq!("remove 1".parse(), Ok(Command::Remove(1)));
        assert_eq!("qty 2 5".parse(), Ok(Command::Quantity(2, 5)));
        assert_eq!("+ 1".parse(), Ok(Command::Increment(1)));
        assert_eq!("dec 4".parse(), Ok(Command::Decrement(4)));
    }

    #[test]
    fn test_zero_position_rejected() {
        assert_eq!(
            "add 0".parse::<Command>(),
            Err(CommandError::InvalidNumber("0".to_string()))
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert!(matches!(
            "add".parse::<Command>(),
            Err(CommandError::MissingArgument { command: "add", .. })
        ));
        assert!(matches!(
            "qty 1".parse::<Command>(),
            Err(CommandError::MissingArgument { command: "qty", .. })
        ));
        assert_eq!(
            "qty 1 many".parse::<Command>(),
            Err(CommandError::InvalidNumber("many".to_string()))
        );
    }

    #[test]
    fn test_free_text_arguments_keep_spaces() {
        assert_eq!(
            "name  Ada Lovelace ".parse(),
            Ok(Command::Name("Ada Lovelace".to_string()))
        );
        assert_eq!("email".parse(), Ok(Command::Email(String::new())));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
