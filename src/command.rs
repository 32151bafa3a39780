use crate::error::AppError;

/// Gallery action requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print saved photos, newest first
    List,
    Capture,
    /// Delete by filepath or bare file name
    Delete(String),
}

impl Command {
    pub fn parse<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let command = match args.next().as_deref() {
            None | Some("list") => Command::List,
            Some("capture") => Command::Capture,
            Some("delete") => {
                let target = args.next().ok_or_else(|| {
                    AppError::Validation("usage: delete <filepath>".to_string())
                })?;
                Command::Delete(target)
            }
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "unknown command '{}', expected list, capture or delete",
                    other
                )))
            }
        };

        if let Some(extra) = args.next() {
            return Err(AppError::Validation(format!(
                "unexpected argument '{}'",
                extra
            )));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, AppError> {
        Command::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults_to_list() {
        assert_eq!(parse(&[]).unwrap(), Command::List);
        assert_eq!(parse(&["list"]).unwrap(), Command::List);
    }

    #[test]
    fn test_delete_requires_target() {
        assert_eq!(
            parse(&["delete", "1700000000000.jpeg"]).unwrap(),
            Command::Delete("1700000000000.jpeg".to_string())
        );
        assert!(matches!(parse(&["delete"]), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_unknown_and_extra_arguments() {
        assert!(parse(&["share"]).is_err());
        assert!(parse(&["capture", "now"]).is_err());
    }
}
