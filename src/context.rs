//! Top-level drawer context: tab, sub-category and discipline
//!
//! Transitions are pure; each returns the set of resets the controller must
//! apply to the view stack and the navigation paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Lesson,
    Space,
    Mine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubCategory {
    Public,
    Personal,
    Courses,
}

/// Which forest (and course table) a panel addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Public,
    Personal,
}

/// The panel shown when the view stack is empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootPanel {
    LessonSchedule,
    Explorer(Scope),
    CourseCatalogue { owner: Scope, discipline: String },
}

/// Resets implied by a context transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetEffects {
    pub view_stack: bool,
    pub public_path: bool,
    pub personal_path: bool,
}

impl ResetEffects {
    pub const NONE: ResetEffects = ResetEffects {
        view_stack: false,
        public_path: false,
        personal_path: false,
    };

    fn stack_only() -> Self {
        Self {
            view_stack: true,
            ..Self::NONE
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSelection {
    active_tab: Tab,
    space_category: SubCategory,
    mine_category: SubCategory,
    active_discipline: String,
}

impl ContextSelection {
    pub fn new(active_tab: Tab, discipline: impl Into<String>) -> Self {
        Self {
            active_tab,
            space_category: SubCategory::Public,
            mine_category: SubCategory::Personal,
            active_discipline: discipline.into(),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn active_discipline(&self) -> &str {
        &self.active_discipline
    }

    /// Sub-category of the active tab; the lesson tab has none
    pub fn active_sub_category(&self) -> Option<SubCategory> {
        match self.active_tab {
            Tab::Lesson => None,
            Tab::Space => Some(self.space_category),
            Tab::Mine => Some(self.mine_category),
        }
    }

    /// Switch tabs. Always clears the view stack; entering Space forces the
    /// public category, entering Mine forces the personal category and
    /// clears the personal path.
    pub fn select_tab(&mut self, tab: Tab) -> ResetEffects {
        self.active_tab = tab;
        let mut effects = ResetEffects::stack_only();
        match tab {
            Tab::Lesson => {}
            Tab::Space => self.space_category = SubCategory::Public,
            Tab::Mine => {
                self.mine_category = SubCategory::Personal;
                effects.personal_path = true;
            }
        }
        log::debug!("context: tab -> {:?}, resets {:?}", tab, effects);
        effects
    }

    /// Switch the sub-category within Space or Mine.
    ///
    /// Selecting Public clears the public path. Selecting Personal leaves the
    /// personal path alone. Categories that do not belong to the active tab
    /// are ignored.
    pub fn select_sub_category(&mut self, category: SubCategory) -> ResetEffects {
        match (self.active_tab, category) {
            (Tab::Space, SubCategory::Public | SubCategory::Courses) => {
                self.space_category = category;
            }
            (Tab::Mine, SubCategory::Personal | SubCategory::Courses) => {
                self.mine_category = category;
            }
            (tab, category) => {
                log::warn!("context: {:?} is not a category of the {:?} tab", category, tab);
                return ResetEffects::NONE;
            }
        }
        let effects = ResetEffects {
            public_path: category == SubCategory::Public,
            ..ResetEffects::stack_only()
        };
        log::debug!("context: sub-category -> {:?}, resets {:?}", category, effects);
        effects
    }

    /// Switch discipline; only the view stack is cleared
    pub fn select_discipline(&mut self, discipline: impl Into<String>) -> ResetEffects {
        self.active_discipline = discipline.into();
        log::debug!("context: discipline -> {}", self.active_discipline);
        ResetEffects::stack_only()
    }

    /// Forest addressed by the explorer, if the root panel is an explorer
    pub fn explorer_scope(&self) -> Option<Scope> {
        match self.root_panel() {
            RootPanel::Explorer(scope) => Some(scope),
            _ => None,
        }
    }

    pub fn root_panel(&self) -> RootPanel {
        match (self.active_tab, self.active_sub_category()) {
            (Tab::Space, Some(SubCategory::Public)) => RootPanel::Explorer(Scope::Public),
            (Tab::Mine, Some(SubCategory::Personal)) => RootPanel::Explorer(Scope::Personal),
            (Tab::Space, _) => RootPanel::CourseCatalogue {
                owner: Scope::Public,
                discipline: self.active_discipline.clone(),
            },
            (Tab::Mine, _) => RootPanel::CourseCatalogue {
                owner: Scope::Personal,
                discipline: self.active_discipline.clone(),
            },
            (Tab::Lesson, _) => RootPanel::LessonSchedule,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tab::Lesson => "lesson",
            Tab::Space => "space",
            Tab::Mine => "mine",
        })
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lesson" => Ok(Tab::Lesson),
            "space" => Ok(Tab::Space),
            "mine" => Ok(Tab::Mine),
            _ => Err(format!("unknown tab '{}'", s)),
        }
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubCategory::Public => "public",
            SubCategory::Personal => "personal",
            SubCategory::Courses => "courses",
        })
    }
}

impl FromStr for SubCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(SubCategory::Public),
            "personal" => Ok(SubCategory::Personal),
            "courses" => Ok(SubCategory::Courses),
            _ => Err(format!("unknown sub-category '{}'", s)),
        }
    }
}
