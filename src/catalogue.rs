use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::context::Scope;
use crate::tree::MaterialCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// A course or lesson in a catalogue table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub id: String,
    pub name: String,
    pub count: u32,
}

/// A material handed to the teaching view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: MaterialCategory,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// One entry of the day's lesson schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledLesson {
    pub id: String,
    pub time: String,
    pub title: String,
    pub grade: String,
    pub subject: String,
    pub material_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiTool {
    pub id: String,
    pub name: String,
}

/// Flat tables backing the course, lesson and schedule panels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalogue {
    pub disciplines: Vec<Discipline>,
    /// Space courses keyed by discipline id
    pub space_courses: BTreeMap<String, Vec<CatalogueEntry>>,
    /// Personal courses keyed by discipline id
    pub personal_courses: BTreeMap<String, Vec<CatalogueEntry>>,
    /// Lessons keyed by course id
    pub lessons: BTreeMap<String, Vec<CatalogueEntry>>,
    /// Materials keyed by lesson id
    pub lesson_materials: BTreeMap<String, Vec<MaterialItem>>,
    pub schedule: Vec<ScheduledLesson>,
    pub ai_tools: Vec<AiTool>,
}

impl Catalogue {
    pub fn courses_for(&self, owner: Scope, discipline: &str) -> &[CatalogueEntry] {
        let table = match owner {
            Scope::Public => &self.space_courses,
            Scope::Personal => &self.personal_courses,
        };
        table.get(discipline).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Course listed in the `owner` table under `discipline`
    pub fn course(
        &self,
        owner: Scope,
        discipline: &str,
        course_id: &str,
    ) -> Option<&CatalogueEntry> {
        self.courses_for(owner, discipline)
            .iter()
            .find(|course| course.id == course_id)
    }

    pub fn lessons_for(&self, course_id: &str) -> &[CatalogueEntry] {
        self.lessons.get(course_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lesson ids are only unique within a course
    pub fn lesson(&self, course_id: &str, lesson_id: &str) -> Option<&CatalogueEntry> {
        self.lessons_for(course_id)
            .iter()
            .find(|lesson| lesson.id == lesson_id)
    }

    pub fn materials_for(&self, lesson_id: &str) -> &[MaterialItem] {
        self.lesson_materials
            .get(lesson_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn scheduled(&self, schedule_id: &str) -> Option<&ScheduledLesson> {
        self.schedule.iter().find(|lesson| lesson.id == schedule_id)
    }

    pub fn ai_tool(&self, tool_id: &str) -> Option<&AiTool> {
        self.ai_tools.iter().find(|tool| tool.id == tool_id)
    }

    pub fn first_discipline(&self) -> Option<&Discipline> {
        self.disciplines.first()
    }
}
