//! Drawer controller
//!
//! Routes every user action to the tree store, the navigation paths, the
//! view stack or the context selection, and projects the combined state into
//! a single [`CurrentView`] for rendering.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::catalogue::{
    AiTool, Catalogue, CatalogueEntry, Discipline, MaterialItem, ScheduledLesson,
};
use crate::config::Config;
use crate::context::{ContextSelection, ResetEffects, RootPanel, Scope, SubCategory, Tab};
use crate::library::Library;
use crate::navigation::NavigationPath;
use crate::notification::{Notifier, Toast};
use crate::tree::{filter_nodes, Forest, MaterialCategory, Node, NodeId};
use crate::view_stack::{Panel, ViewKind, ViewStack, ViewState};

const ROOT_TITLE: &str = "教学资料";
const ROOT_SUBTITLE: &str = "Materials Library";
const AI_TOOLS_TITLE: &str = "AI 辅助生成";

/// Source of folder names, normally a confirmation prompt.
///
/// Returning `None` cancels the creation.
#[cfg_attr(test, mockall::automock)]
pub trait FolderNamePrompt {
    fn ask(&mut self, suggested: &str) -> Option<String>;
}

impl<F> FolderNamePrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn ask(&mut self, suggested: &str) -> Option<String> {
        self(suggested)
    }
}

/// Handed to the teaching view when a lesson starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingSession {
    pub lesson_title: String,
    pub materials: Vec<MaterialItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

/// One row of the tree explorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerEntry {
    pub id: NodeId,
    pub name: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MaterialCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_count: Option<usize>,
}

impl From<&Node> for ExplorerEntry {
    fn from(node: &Node) -> Self {
        let is_folder = node.is_folder();
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: if is_folder {
                EntryKind::Folder
            } else {
                EntryKind::File
            },
            category: node.category(),
            size: node.size.clone(),
            date: node.date,
            child_count: is_folder.then(|| node.child_ids().len()),
        }
    }
}

/// What the presentation layer should render right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum CurrentView {
    Explorer {
        scope: Scope,
        root_label: String,
        breadcrumbs: Vec<String>,
        entries: Vec<ExplorerEntry>,
    },
    CourseCatalogue {
        owner: Scope,
        discipline: String,
        disciplines: Vec<Discipline>,
        courses: Vec<CatalogueEntry>,
    },
    LessonSchedule {
        lessons: Vec<ScheduledLesson>,
    },
    Lessons {
        title: String,
        course_id: String,
        lessons: Vec<CatalogueEntry>,
    },
    Files {
        title: String,
        lesson_id: String,
        materials: Vec<MaterialItem>,
    },
    Tool {
        title: String,
        tools: Vec<AiTool>,
        selected: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
    pub can_go_back: bool,
}

/// Full observable state, used by the command-line driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub is_open: bool,
    pub context: ContextSelection,
    pub header: Header,
    pub view: CurrentView,
    pub toast: Option<Toast>,
}

pub struct Drawer {
    public: Rc<Forest>,
    personal: Rc<Forest>,
    catalogue: Catalogue,
    public_path: NavigationPath,
    personal_path: NavigationPath,
    views: ViewStack,
    context: ContextSelection,
    notifier: Notifier,
    selected_tool: Option<String>,
    is_open: bool,
    default_folder_name: String,
}

impl Drawer {
    pub fn new(library: Library, config: &Config) -> Self {
        let discipline = config
            .initial_discipline
            .clone()
            .or_else(|| library.catalogue.first_discipline().map(|d| d.id.clone()))
            .unwrap_or_default();

        log::info!(
            "Drawer ready: tab {}, discipline '{}', {} public / {} personal nodes",
            config.initial_tab,
            discipline,
            library.public.len(),
            library.personal.len()
        );

        Self {
            public: Rc::new(library.public),
            personal: Rc::new(library.personal),
            catalogue: library.catalogue,
            public_path: NavigationPath::new(),
            personal_path: NavigationPath::new(),
            views: ViewStack::new(),
            context: ContextSelection::new(config.initial_tab, discipline),
            notifier: Notifier::new(),
            selected_tool: None,
            is_open: false,
            default_folder_name: config.default_folder_name.clone(),
        }
    }

    // Accessors

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn context(&self) -> &ContextSelection {
        &self.context
    }

    pub fn view_stack(&self) -> &ViewStack {
        &self.views
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Current snapshot of a forest
    pub fn forest(&self, scope: Scope) -> &Rc<Forest> {
        match scope {
            Scope::Public => &self.public,
            Scope::Personal => &self.personal,
        }
    }

    pub fn path(&self, scope: Scope) -> &NavigationPath {
        match scope {
            Scope::Public => &self.public_path,
            Scope::Personal => &self.personal_path,
        }
    }

    fn path_mut(&mut self, scope: Scope) -> &mut NavigationPath {
        match scope {
            Scope::Public => &mut self.public_path,
            Scope::Personal => &mut self.personal_path,
        }
    }

    /// Contents of the current folder of `scope`
    pub fn children(&self, scope: Scope) -> Vec<&Node> {
        self.forest(scope).children_of(self.path(scope).current())
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.notifier.current()
    }

    pub fn selected_tool(&self) -> Option<&str> {
        self.selected_tool.as_deref()
    }

    /// Forest shown by the explorer, if the explorer is the visible panel
    fn visible_explorer(&self) -> Option<Scope> {
        if self.views.is_empty() {
            self.context.explorer_scope()
        } else {
            None
        }
    }

    // Open/close

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    // Context selection

    fn apply(&mut self, effects: ResetEffects) {
        if effects.view_stack {
            self.views.reset();
            self.selected_tool = None;
        }
        if effects.public_path {
            self.public_path.reset();
        }
        if effects.personal_path {
            self.personal_path.reset();
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        let effects = self.context.select_tab(tab);
        self.apply(effects);
    }

    /// Returns false when the category does not belong to the active tab
    pub fn select_sub_category(&mut self, category: SubCategory) -> bool {
        let effects = self.context.select_sub_category(category);
        if effects == ResetEffects::NONE {
            return false;
        }
        self.apply(effects);
        true
    }

    pub fn select_discipline(&mut self, discipline: &str) {
        let effects = self.context.select_discipline(discipline);
        self.apply(effects);
    }

    // Tree explorer

    /// Descend into a folder listed in the current explorer view
    pub fn enter_folder(&mut self, id: &NodeId) -> bool {
        let Some(scope) = self.visible_explorer() else {
            log::warn!("enter_folder: explorer not visible, ignoring '{}'", id);
            return false;
        };
        let forest = Rc::clone(self.forest(scope));
        let listing = forest.children_of(self.path(scope).current());
        let Some(node) = listing.into_iter().find(|node| &node.id == id) else {
            log::debug!("enter_folder: '{}' is not in the current folder", id);
            return false;
        };
        let entered = self.path_mut(scope).enter(node);
        if entered {
            log::info!("Entered folder '{}' ({:?})", node.name, scope);
        }
        entered
    }

    /// Jump to breadcrumb `index`; any negative index returns to the root
    pub fn jump_breadcrumb(&mut self, index: isize) -> bool {
        let Some(scope) = self.visible_explorer() else {
            log::warn!("jump_breadcrumb: explorer not visible");
            return false;
        };
        self.path_mut(scope).jump_to(index)
    }

    /// Create a folder in the current explorer folder.
    ///
    /// `None`, a blank name, or no visible explorer leave every forest
    /// snapshot untouched. Any other name is stored as given.
    pub fn create_folder(&mut self, name: Option<&str>) -> Option<NodeId> {
        let Some(name) = name.filter(|name| !name.trim().is_empty()) else {
            log::debug!("create_folder: cancelled");
            return None;
        };
        let Some(scope) = self.visible_explorer() else {
            log::warn!("create_folder: explorer not visible, ignoring '{}'", name);
            return None;
        };

        let parent = self.path(scope).current().cloned();
        let today = Local::now().date_naive();
        let Some((next, id)) = self.forest(scope).insert_folder(parent.as_ref(), name, today) else {
            log::warn!("create_folder: current folder {:?} no longer resolves", parent);
            return None;
        };

        match scope {
            Scope::Public => self.public = Rc::new(next),
            Scope::Personal => self.personal = Rc::new(next),
        }
        log::info!("Created folder '{}' ({}) in {:?}", name, id, scope);
        self.notifier.notify(format!("已创建文件夹: {}", name));
        Some(id)
    }

    /// Ask `prompt` for a name, then create the folder
    pub fn create_folder_with(&mut self, prompt: &mut dyn FolderNamePrompt) -> Option<NodeId> {
        if self.visible_explorer().is_none() {
            return None;
        }
        let answer = prompt.ask(&self.default_folder_name);
        self.create_folder(answer.as_deref())
    }

    /// Case-insensitive name filter over the current explorer listing
    pub fn filter_entries(&self, query: &str) -> Vec<ExplorerEntry> {
        let Some(scope) = self.visible_explorer() else {
            return Vec::new();
        };
        filter_nodes(&self.children(scope), query)
            .into_iter()
            .map(ExplorerEntry::from)
            .collect()
    }

    // Panels

    pub fn push_panel(&mut self, view: ViewState) {
        self.views.push(view);
    }

    /// Go back one panel; false when already at the root panel
    pub fn pop_panel(&mut self) -> bool {
        match self.views.pop() {
            Some(view) => {
                if view.kind() == ViewKind::Tool {
                    self.selected_tool = None;
                }
                true
            }
            None => false,
        }
    }

    /// Show the lessons of a course listed in the visible course catalogue
    pub fn open_course(&mut self, course_id: &str) -> bool {
        if !self.views.is_empty() {
            log::warn!("open_course: course catalogue not visible, ignoring '{}'", course_id);
            return false;
        }
        let RootPanel::CourseCatalogue { owner, discipline } = self.context.root_panel() else {
            log::warn!("open_course: course catalogue not visible, ignoring '{}'", course_id);
            return false;
        };
        let Some(course) = self.catalogue.course(owner, &discipline, course_id) else {
            log::warn!(
                "open_course: '{}' is not listed for {:?} in '{}'",
                course_id,
                owner,
                discipline
            );
            return false;
        };
        let view = ViewState::catalogue(course.name.clone(), course_id);
        self.push_panel(view);
        true
    }

    /// Show the materials of a lesson of the course on top of the stack
    pub fn open_lesson(&mut self, lesson_id: &str) -> bool {
        let Some(Panel::Catalogue { subject_id }) = self.views.top().map(ViewState::panel) else {
            log::warn!("open_lesson: no course catalogue is showing");
            return false;
        };
        let Some(lesson) = self.catalogue.lesson(subject_id, lesson_id) else {
            log::warn!("open_lesson: course '{}' has no lesson '{}'", subject_id, lesson_id);
            return false;
        };
        let view = ViewState::files(lesson.name.clone(), lesson_id);
        self.push_panel(view);
        true
    }

    pub fn open_ai_tools(&mut self) -> bool {
        if self.views.top().map(ViewState::kind) == Some(ViewKind::Tool) {
            return false;
        }
        self.push_panel(ViewState::tool(AI_TOOLS_TITLE));
        true
    }

    /// Highlight one generator inside the tool panel
    pub fn select_tool(&mut self, tool_id: &str) -> bool {
        if self.views.top().map(ViewState::kind) != Some(ViewKind::Tool) {
            return false;
        }
        if self.catalogue.ai_tool(tool_id).is_none() {
            log::warn!("select_tool: unknown tool '{}'", tool_id);
            return false;
        }
        self.selected_tool = Some(tool_id.to_string());
        true
    }

    // Notifications

    pub fn notify(&mut self, message: impl Into<String>) -> Toast {
        self.notifier.notify(message)
    }

    /// Timer callback; only clears the toast it was started for
    pub fn expire_toast(&mut self, generation: u64) -> bool {
        self.notifier.expire(generation)
    }

    pub fn push_material(&mut self, material_id: &str) -> Toast {
        log::info!("Pushed material '{}'", material_id);
        self.notify("已推送")
    }

    pub fn send_material(&mut self, material_id: &str) -> Toast {
        log::info!("Sent material '{}'", material_id);
        self.notify("已发送")
    }

    // Teaching

    /// Hand a lesson to the teaching view; closes the drawer
    pub fn start_teaching(
        &mut self,
        lesson_title: impl Into<String>,
        materials: Vec<MaterialItem>,
    ) -> TeachingSession {
        let session = TeachingSession {
            lesson_title: lesson_title.into(),
            materials,
        };
        log::info!(
            "Start teaching '{}' with {} materials",
            session.lesson_title,
            session.materials.len()
        );
        self.is_open = false;
        session
    }

    /// Start a lesson from the schedule
    pub fn start_lesson(&mut self, schedule_id: &str) -> Option<TeachingSession> {
        let Some(lesson) = self.catalogue.scheduled(schedule_id) else {
            log::warn!("start_lesson: no scheduled lesson '{}'", schedule_id);
            return None;
        };
        let title = lesson.title.clone();
        let materials = self.catalogue.materials_for(schedule_id).to_vec();
        Some(self.start_teaching(title, materials))
    }

    // Projection

    pub fn header(&self) -> Header {
        match self.views.top() {
            None => Header {
                title: ROOT_TITLE.to_string(),
                subtitle: ROOT_SUBTITLE.to_string(),
                can_go_back: false,
            },
            Some(view) => Header {
                title: view.title().to_string(),
                subtitle: match view.kind() {
                    ViewKind::Files => "Resources List",
                    ViewKind::Tool => "AI Assistant",
                    ViewKind::Catalogue => "Catalogue",
                }
                .to_string(),
                can_go_back: true,
            },
        }
    }

    pub fn current_view(&self) -> CurrentView {
        let Some(view) = self.views.top() else {
            return self.root_view();
        };
        match view.panel() {
            Panel::Catalogue { subject_id } => CurrentView::Lessons {
                title: view.title().to_string(),
                course_id: subject_id.clone(),
                lessons: self.catalogue.lessons_for(subject_id).to_vec(),
            },
            Panel::Files { subject_id } => CurrentView::Files {
                title: view.title().to_string(),
                lesson_id: subject_id.clone(),
                materials: self.catalogue.materials_for(subject_id).to_vec(),
            },
            Panel::Tool => CurrentView::Tool {
                title: view.title().to_string(),
                tools: self.catalogue.ai_tools.clone(),
                selected: self.selected_tool.clone(),
            },
        }
    }

    fn root_view(&self) -> CurrentView {
        match self.context.root_panel() {
            RootPanel::Explorer(scope) => CurrentView::Explorer {
                scope,
                root_label: match scope {
                    Scope::Public => "全部资料",
                    Scope::Personal => "我的资料",
                }
                .to_string(),
                breadcrumbs: self
                    .path(scope)
                    .breadcrumb_labels()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                entries: self
                    .children(scope)
                    .into_iter()
                    .map(ExplorerEntry::from)
                    .collect(),
            },
            RootPanel::CourseCatalogue { owner, discipline } => CurrentView::CourseCatalogue {
                owner,
                courses: self.catalogue.courses_for(owner, &discipline).to_vec(),
                disciplines: self.catalogue.disciplines.clone(),
                discipline,
            },
            RootPanel::LessonSchedule => CurrentView::LessonSchedule {
                lessons: self.catalogue.schedule.clone(),
            },
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            is_open: self.is_open,
            context: self.context.clone(),
            header: self.header(),
            view: self.current_view(),
            toast: self.notifier.current().cloned(),
        }
    }
}
