use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::context::{SubCategory, Tab};
use crate::error::DrawerError;
use crate::tree::NodeId;

/// Represents all drawer actions that can be driven from text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Open,
    Close,

    // Context
    SelectTab(Tab),
    SelectSubCategory(SubCategory),
    SelectDiscipline(String),

    // Tree explorer
    EnterFolder(NodeId),
    JumpBreadcrumb(isize),
    /// `None` models a cancelled name prompt
    CreateFolder(Option<String>),

    // Panels
    OpenCourse(String),
    OpenLesson(String),
    OpenAiTools,
    SelectTool(String),
    PopPanel,

    // Notifications and hand-off
    Notify(String),
    PushMaterial(String),
    SendMaterial(String),
    StartLesson(String),

    // Multi-step commands for scripting
    Sequence(Vec<Command>),
}

fn argument<'a>(command: &str, value: &'a str) -> Result<&'a str, DrawerError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DrawerError::InvalidArgument {
            command: command.to_string(),
            reason: "missing value".to_string(),
        });
    }
    Ok(value)
}

impl FromStr for Command {
    type Err = DrawerError;

    /// Parse a command such as `tab:mine`, `enter:p1`, `jump:-1` or
    /// `sequence:[tab:space,enter:p1]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(inner) = s
            .strip_prefix("sequence:[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            if inner.trim().is_empty() {
                return Ok(Command::Sequence(vec![]));
            }
            let commands = inner
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Command::Sequence(commands));
        }

        let (name, value) = match s.split_once(':') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };

        let command = match (name.to_lowercase().as_str(), value) {
            ("open", None) => Command::Open,
            ("close", None) => Command::Close,
            ("ai" | "ai_tools", None) => Command::OpenAiTools,
            ("back" | "pop", None) => Command::PopPanel,
            ("mkdir", None) => Command::CreateFolder(None),
            ("mkdir", Some(value)) => {
                Command::CreateFolder((!value.trim().is_empty()).then(|| value.to_string()))
            }
            ("tab", Some(value)) => Command::SelectTab(value.trim().parse().map_err(|reason| {
                DrawerError::InvalidArgument {
                    command: name.to_string(),
                    reason,
                }
            })?),
            ("sub" | "category", Some(value)) => {
                Command::SelectSubCategory(value.trim().parse().map_err(|reason| {
                    DrawerError::InvalidArgument {
                        command: name.to_string(),
                        reason,
                    }
                })?)
            }
            ("discipline", Some(value)) => {
                Command::SelectDiscipline(argument(name, value)?.to_string())
            }
            ("enter", Some(value)) => Command::EnterFolder(NodeId::new(argument(name, value)?)),
            ("jump", Some(value)) => {
                let index = argument(name, value)?.parse::<isize>().map_err(|e| {
                    DrawerError::InvalidArgument {
                        command: name.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Command::JumpBreadcrumb(index)
            }
            ("course", Some(value)) => Command::OpenCourse(argument(name, value)?.to_string()),
            ("lesson", Some(value)) => Command::OpenLesson(argument(name, value)?.to_string()),
            ("tool", Some(value)) => Command::SelectTool(argument(name, value)?.to_string()),
            ("notify", Some(value)) => Command::Notify(argument(name, value)?.to_string()),
            ("push", Some(value)) => Command::PushMaterial(argument(name, value)?.to_string()),
            ("send", Some(value)) => Command::SendMaterial(argument(name, value)?.to_string()),
            ("teach", Some(value)) => Command::StartLesson(argument(name, value)?.to_string()),
            _ => return Err(DrawerError::UnknownCommand(s.to_string())),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Open => write!(f, "open"),
            Command::Close => write!(f, "close"),
            Command::SelectTab(tab) => write!(f, "tab:{}", tab),
            Command::SelectSubCategory(category) => write!(f, "sub:{}", category),
            Command::SelectDiscipline(id) => write!(f, "discipline:{}", id),
            Command::EnterFolder(id) => write!(f, "enter:{}", id),
            Command::JumpBreadcrumb(index) => write!(f, "jump:{}", index),
            Command::CreateFolder(None) => write!(f, "mkdir"),
            Command::CreateFolder(Some(name)) => write!(f, "mkdir:{}", name),
            Command::OpenCourse(id) => write!(f, "course:{}", id),
            Command::OpenLesson(id) => write!(f, "lesson:{}", id),
            Command::OpenAiTools => write!(f, "ai"),
            Command::SelectTool(id) => write!(f, "tool:{}", id),
            Command::PopPanel => write!(f, "back"),
            Command::Notify(message) => write!(f, "notify:{}", message),
            Command::PushMaterial(id) => write!(f, "push:{}", id),
            Command::SendMaterial(id) => write!(f, "send:{}", id),
            Command::StartLesson(id) => write!(f, "teach:{}", id),
            Command::Sequence(commands) => {
                let joined = commands
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "sequence:[{}]", joined)
            }
        }
    }
}
