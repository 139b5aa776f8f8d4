use assert_matches::assert_matches;
use chrono::Local;
use maplit::hashset;
use materials_drawer::config::Config;
use materials_drawer::context::{Scope, SubCategory, Tab};
use materials_drawer::drawer::{CurrentView, Drawer, EntryKind};
use materials_drawer::library::Library;
use materials_drawer::tree::NodeId;
use materials_drawer::view_stack::ViewState;
use std::collections::HashSet;
use std::rc::Rc;

// Test utilities
fn create_test_drawer() -> Drawer {
    let mut drawer = Drawer::new(
        Library::seeded().expect("seed library should parse"),
        &Config::default(),
    );
    drawer.open();
    drawer
}

fn listing(drawer: &Drawer, scope: Scope) -> Vec<String> {
    drawer
        .children(scope)
        .iter()
        .map(|node| node.id.to_string())
        .collect()
}

fn go_three_deep_in_personal(drawer: &mut Drawer) -> NodeId {
    drawer.select_tab(Tab::Mine);
    let a = drawer.create_folder(Some("一")).unwrap();
    assert!(drawer.enter_folder(&a));
    let b = drawer.create_folder(Some("二")).unwrap();
    assert!(drawer.enter_folder(&b));
    let c = drawer.create_folder(Some("三")).unwrap();
    assert!(drawer.enter_folder(&c));
    assert_eq!(drawer.path(Scope::Personal).len(), 3);
    c
}

mod explorer {
    use super::*;

    #[test]
    fn test_breadcrumb_round_trip_in_public_forest() {
        let mut drawer = create_test_drawer();
        assert!(drawer.path(Scope::Public).is_empty());

        assert!(drawer.enter_folder(&"p1".into()));
        assert!(drawer.enter_folder(&"p1-1".into()));
        assert_eq!(listing(&drawer, Scope::Public), vec!["p1-1-1", "p1-1-2"]);

        assert!(drawer.jump_breadcrumb(0));
        assert_eq!(
            drawer.path(Scope::Public).breadcrumb_labels(),
            vec!["2024秋季教研素材"]
        );
        assert_eq!(listing(&drawer, Scope::Public), vec!["p1-1", "p1-2"]);
    }

    #[test]
    fn test_breadcrumbs_in_projection() {
        let mut drawer = create_test_drawer();
        drawer.enter_folder(&"p1".into());
        drawer.enter_folder(&"p1-1".into());

        assert_matches!(
            drawer.current_view(),
            CurrentView::Explorer {
                scope: Scope::Public,
                ref root_label,
                ref breadcrumbs,
                ref entries,
            }
                if root_label == "全部资料"
                    && breadcrumbs == &["2024秋季教研素材", "数学组集体备课"]
                    && entries.iter().all(|e| e.kind == EntryKind::File)
        );
    }

    #[test]
    fn test_out_of_range_jump_is_ignored() {
        let mut drawer = create_test_drawer();
        drawer.enter_folder(&"p2".into());
        assert!(!drawer.jump_breadcrumb(1));
        assert!(!drawer.jump_breadcrumb(7));
        assert_eq!(drawer.path(Scope::Public).len(), 1);
        assert!(drawer.jump_breadcrumb(-1));
        assert!(drawer.path(Scope::Public).is_empty());
    }

    #[test]
    fn test_create_folder_at_personal_root() {
        let mut drawer = create_test_drawer();
        drawer.select_tab(Tab::Mine);
        let existing: HashSet<String> = listing(&drawer, Scope::Personal).into_iter().collect();

        let id = drawer.create_folder(Some("笔记")).unwrap();
        assert!(!existing.contains(id.as_str()));

        let roots = drawer.children(Scope::Personal);
        let created = roots.iter().find(|node| node.id == id).unwrap();
        assert_eq!(created.name, "笔记");
        assert!(created.is_folder());
        assert!(created.child_ids().is_empty());
        assert_eq!(created.date, Local::now().date_naive());
        assert_eq!(roots.last().unwrap().id, id);

        // The public forest is untouched
        assert!(!drawer.forest(Scope::Public).contains(&id));
    }

    #[test]
    fn test_create_folder_none_keeps_forest_reference() {
        let mut drawer = create_test_drawer();
        drawer.select_tab(Tab::Mine);
        let before = Rc::clone(drawer.forest(Scope::Personal));

        assert!(drawer.create_folder(None).is_none());
        assert!(drawer.create_folder(Some("")).is_none());
        assert!(Rc::ptr_eq(&before, drawer.forest(Scope::Personal)));
        assert!(drawer.toast().is_none());
    }

    #[test]
    fn test_create_folder_nested_keeps_old_snapshot_readable() {
        let mut drawer = create_test_drawer();
        drawer.enter_folder(&"p1".into());
        let before = Rc::clone(drawer.forest(Scope::Public));

        let id = drawer.create_folder(Some("英语组")).unwrap();
        assert_eq!(listing(&drawer, Scope::Public), vec!["p1-1", "p1-2", id.as_str()]);

        // Old snapshot still answers reads as before
        let old: Vec<&str> = before
            .children_of(Some(&"p1".into()))
            .iter()
            .map(|node| node.id.as_str())
            .collect();
        assert_eq!(old, vec!["p1-1", "p1-2"]);
    }

    #[test]
    fn test_paths_are_independent_per_forest() {
        let mut drawer = create_test_drawer();
        drawer.enter_folder(&"p1".into());
        drawer.select_tab(Tab::Mine);
        drawer.enter_folder(&"m-f1".into());

        assert_eq!(drawer.path(Scope::Public).breadcrumb_labels(), vec!["2024秋季教研素材"]);
        assert_eq!(drawer.path(Scope::Personal).breadcrumb_labels(), vec!["我的私藏课件"]);

        // Back on Space the public path survived the round trip
        drawer.select_tab(Tab::Space);
        assert_eq!(drawer.path(Scope::Public).len(), 1);
    }
}

mod context_switching {
    use super::*;

    #[test]
    fn test_every_tab_switch_empties_view_stack() {
        for tab in [Tab::Lesson, Tab::Space, Tab::Mine] {
            let mut drawer = create_test_drawer();
            drawer.select_sub_category(SubCategory::Courses);
            drawer.open_course("c1");
            drawer.open_lesson("l1");
            drawer.open_ai_tools();
            assert_eq!(drawer.view_stack().depth(), 3);

            drawer.select_tab(tab);
            assert!(drawer.view_stack().is_empty());
        }
    }

    #[test]
    fn test_mine_tab_resets_personal_path() {
        let mut drawer = create_test_drawer();
        go_three_deep_in_personal(&mut drawer);

        drawer.select_tab(Tab::Space);
        assert_eq!(drawer.path(Scope::Personal).len(), 3);
        drawer.select_tab(Tab::Mine);
        assert!(drawer.path(Scope::Personal).is_empty());
    }

    #[test]
    fn test_personal_sub_category_keeps_personal_path() {
        let mut drawer = create_test_drawer();
        let deepest = go_three_deep_in_personal(&mut drawer);

        assert!(drawer.select_sub_category(SubCategory::Courses));
        assert!(drawer.select_sub_category(SubCategory::Personal));
        assert_eq!(drawer.path(Scope::Personal).len(), 3);
        assert_eq!(drawer.path(Scope::Personal).current(), Some(&deepest));
    }

    #[test]
    fn test_public_sub_category_resets_public_path() {
        let mut drawer = create_test_drawer();
        drawer.enter_folder(&"p1".into());
        drawer.select_sub_category(SubCategory::Courses);
        assert_eq!(drawer.path(Scope::Public).len(), 1);
        drawer.select_sub_category(SubCategory::Public);
        assert!(drawer.path(Scope::Public).is_empty());
    }

    #[test]
    fn test_course_tables_follow_tab() {
        let mut drawer = create_test_drawer();
        drawer.select_sub_category(SubCategory::Courses);
        let CurrentView::CourseCatalogue { courses, .. } = drawer.current_view() else {
            panic!("expected course catalogue");
        };
        let ids: HashSet<String> = courses.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, hashset! {"c1".to_string(), "c2".to_string(), "c3".to_string()});

        drawer.select_tab(Tab::Mine);
        drawer.select_sub_category(SubCategory::Courses);
        let CurrentView::CourseCatalogue { owner, courses, .. } = drawer.current_view() else {
            panic!("expected course catalogue");
        };
        assert_eq!(owner, Scope::Personal);
        assert_eq!(courses.len(), 2);
    }
}

mod panels {
    use super::*;

    #[test]
    fn test_back_returns_to_root_panel_of_context() {
        let mut drawer = create_test_drawer();
        drawer.push_panel(ViewState::tool("AI 辅助生成"));
        assert!(drawer.header().can_go_back);
        assert_matches!(drawer.current_view(), CurrentView::Tool { .. });

        assert!(drawer.pop_panel());
        assert_matches!(drawer.current_view(), CurrentView::Explorer { scope: Scope::Public, .. });
        assert!(!drawer.pop_panel());
    }

    #[test]
    fn test_pushed_catalogue_hides_explorer_actions() {
        let mut drawer = create_test_drawer();
        drawer.push_panel(ViewState::catalogue("奥数金牌辅导小班课", "c1"));

        assert!(drawer.create_folder(Some("x")).is_none());
        assert!(!drawer.jump_breadcrumb(-1));
        assert!(drawer.filter_entries("").is_empty());
    }

    #[test]
    fn test_courses_open_only_from_visible_catalogue() {
        let mut drawer = create_test_drawer();
        // Explorer root: no catalogue on screen
        assert!(!drawer.open_course("c1"));

        drawer.select_sub_category(SubCategory::Courses);
        assert!(!drawer.open_course("mc1"));
        assert!(drawer.open_course("c1"));
        assert_eq!(drawer.header().title, "奥数金牌辅导小班课");

        drawer.select_tab(Tab::Mine);
        drawer.select_sub_category(SubCategory::Courses);
        assert!(!drawer.open_course("mc3"));
        assert!(drawer.open_course("mc1"));
    }

    #[test]
    fn test_start_teaching_hands_off_and_closes() {
        let mut drawer = create_test_drawer();
        drawer.select_sub_category(SubCategory::Courses);
        drawer.open_course("c1");
        drawer.open_lesson("l1");
        let CurrentView::Files { title, materials, .. } = drawer.current_view() else {
            panic!("expected files");
        };

        let session = drawer.start_teaching(title.clone(), materials.clone());
        assert_eq!(session.lesson_title, title);
        assert_eq!(session.materials, materials);
        assert!(!drawer.is_open());
    }
}
