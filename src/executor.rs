use crate::{
    command::Command,
    drawer::{Drawer, TeachingSession},
};

/// Result of executing a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the command had any visible effect
    pub changed: bool,
    pub status_message: Option<String>,
    /// Set when the command handed a lesson to the teaching view
    pub session: Option<TeachingSession>,
}

impl ExecutionResult {
    fn new(changed: bool, status: impl Into<String>) -> Self {
        Self {
            changed,
            status_message: Some(status.into()),
            session: None,
        }
    }

    fn ignored(command: &Command) -> Self {
        Self::new(false, format!("Ignored: {}", command))
    }
}

/// Executes commands against a drawer
pub struct Executor;

impl Executor {
    /// Execute a command and report what happened
    pub fn execute(drawer: &mut Drawer, command: Command) -> ExecutionResult {
        log::debug!("execute: {}", command);

        let result = match &command {
            Command::Open => {
                drawer.open();
                ExecutionResult::new(true, "Drawer opened")
            }
            Command::Close => {
                drawer.close();
                ExecutionResult::new(true, "Drawer closed")
            }

            Command::SelectTab(tab) => {
                drawer.select_tab(*tab);
                ExecutionResult::new(true, format!("Switched to {} tab", tab))
            }
            Command::SelectSubCategory(category) => {
                if drawer.select_sub_category(*category) {
                    ExecutionResult::new(true, format!("Showing {}", category))
                } else {
                    ExecutionResult::ignored(&command)
                }
            }
            Command::SelectDiscipline(id) => {
                drawer.select_discipline(id);
                ExecutionResult::new(true, format!("Discipline {}", id))
            }

            Command::EnterFolder(id) => Self::outcome(drawer.enter_folder(id), &command),
            Command::JumpBreadcrumb(index) => {
                Self::outcome(drawer.jump_breadcrumb(*index), &command)
            }
            Command::CreateFolder(name) => match drawer.create_folder(name.as_deref()) {
                Some(id) => ExecutionResult::new(true, format!("Created folder {}", id)),
                None => ExecutionResult::ignored(&command),
            },

            Command::OpenCourse(id) => Self::outcome(drawer.open_course(id), &command),
            Command::OpenLesson(id) => Self::outcome(drawer.open_lesson(id), &command),
            Command::OpenAiTools => Self::outcome(drawer.open_ai_tools(), &command),
            Command::SelectTool(id) => Self::outcome(drawer.select_tool(id), &command),
            Command::PopPanel => Self::outcome(drawer.pop_panel(), &command),

            Command::Notify(message) => {
                drawer.notify(message.clone());
                ExecutionResult::new(true, format!("Toast: {}", message))
            }
            Command::PushMaterial(id) => {
                let toast = drawer.push_material(id);
                ExecutionResult::new(true, toast.message)
            }
            Command::SendMaterial(id) => {
                let toast = drawer.send_material(id);
                ExecutionResult::new(true, toast.message)
            }
            Command::StartLesson(id) => match drawer.start_lesson(id) {
                Some(session) => ExecutionResult {
                    changed: true,
                    status_message: Some(format!("Teaching '{}'", session.lesson_title)),
                    session: Some(session),
                },
                None => ExecutionResult::ignored(&command),
            },

            Command::Sequence(commands) => {
                let mut combined = ExecutionResult::default();
                for step in commands {
                    let result = Self::execute(drawer, step.clone());
                    combined.changed |= result.changed;
                    if result.status_message.is_some() {
                        combined.status_message = result.status_message;
                    }
                    if result.session.is_some() {
                        combined.session = result.session;
                    }
                }
                combined
            }
        };

        if !result.changed {
            log::debug!("execute: '{}' had no effect", command);
        }
        result
    }

    fn outcome(changed: bool, command: &Command) -> ExecutionResult {
        if changed {
            ExecutionResult::new(true, format!("Done: {}", command))
        } else {
            ExecutionResult::ignored(command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::context::{Scope, Tab};
    use crate::library::Library;

    fn drawer() -> Drawer {
        Drawer::new(Library::seeded().unwrap(), &Config::default())
    }

    fn run(drawer: &mut Drawer, command: &str) -> ExecutionResult {
        Executor::execute(drawer, command.parse().unwrap())
    }

    #[test]
    fn test_navigation_commands() {
        let mut drawer = drawer();
        assert!(run(&mut drawer, "enter:p1").changed);
        assert!(run(&mut drawer, "enter:p1-1").changed);
        assert_eq!(drawer.path(Scope::Public).breadcrumb_labels().len(), 2);

        let result = run(&mut drawer, "jump:5");
        assert!(!result.changed);
        assert_eq!(result.status_message.as_deref(), Some("Ignored: jump:5"));

        assert!(run(&mut drawer, "jump:-1").changed);
        assert!(drawer.path(Scope::Public).is_empty());
    }

    #[test]
    fn test_sequence_reports_last_session() {
        let mut drawer = drawer();
        let result = run(&mut drawer, "sequence:[open,tab:lesson,teach:l2]");
        assert!(result.changed);
        assert_eq!(drawer.context().active_tab(), Tab::Lesson);
        let session = result.session.unwrap();
        assert_eq!(session.lesson_title, "初中几何进阶: 三角形全等");
        assert_eq!(session.materials.len(), 2);
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_cancelled_mkdir_is_ignored() {
        let mut drawer = drawer();
        let result = run(&mut drawer, "mkdir");
        assert!(!result.changed);
        assert!(drawer.toast().is_none());
    }

    #[test]
    fn test_push_reports_toast() {
        let mut drawer = drawer();
        let result = run(&mut drawer, "push:m1");
        assert_eq!(result.status_message.as_deref(), Some("已推送"));
    }
}
