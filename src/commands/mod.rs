use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::workflow::mutation::{MunicipalityDraft, RegionDraft};

pub const USAGE: &str = "commands: reload | select CODE | create-region CODE|NAME|HREF | create-municipality CODE|NAME|HREF|PHOTO[|REGION] | quit";

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    SelectRegion(String),
    CreateRegion(RegionDraft),
    CreateMunicipality(MunicipalityDraft)
}

#[derive(Debug, PartialEq, Eq)]
pub struct CommandParseError {
    pub cause: String
}

impl std::error::Error for CommandParseError {}

impl Display for CommandParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.cause, USAGE)
    }
}

impl From<String> for CommandParseError {
    fn from(cause: String) -> Self {
        Self { cause }
    }
}

/// Splits `a|b|c` into exactly `N` fields, padding missing trailing fields with "".
fn fields<const N: usize>(arguments: &str) -> Result<[String; N], CommandParseError> {
    let parts: Vec<&str> = arguments.split('|').collect();
    if parts.len() > N {
        return Err(format!("Expected at most {} fields separated by '|', got {}", N, parts.len()).into());
    }

    Ok(std::array::from_fn(|i| parts.get(i).map(|p| p.to_string()).unwrap_or_default()))
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arguments) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arguments = arguments.trim();

        match name {
            "reload" => Ok(Command::Reload),
            "select" => {
                if arguments.is_empty() {
                    return Err("Missing region code".to_string().into());
                }
                Ok(Command::SelectRegion(arguments.to_string()))
            }
            "create-region" => {
                let [code, name, href] = fields::<3>(arguments)?;
                Ok(Command::CreateRegion(RegionDraft { code, name, href }))
            }
            "create-municipality" => {
                let [code, name, href, photo_href, region] = fields::<5>(arguments)?;
                Ok(Command::CreateMunicipality(MunicipalityDraft {
                    code,
                    name,
                    href,
                    photo_href,
                    region: Some(region).filter(|r| !r.trim().is_empty())
                }))
            }
            "" => Err("Empty command".to_string().into()),
            unknown => Err(format!("Unknown command: {}", unknown).into())
        }
    }
}
