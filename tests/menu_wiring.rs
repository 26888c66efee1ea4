mod support;

use support::{ControllerHarness, seed_file};

use pannier::egui_app::state::MenuContext;
use pannier::egui_app::ui::register_menus;
use pannier::menu::PointerEvent;

#[test]
fn create_basket_menu_item_opens_the_dialog() {
    let mut h = ControllerHarness::new();
    let handles = register_menus(
        &h.controller.menu_registry(),
        h.controller.command_queue(),
    );

    let baskets = &handles.main.definition().groups[0].items[0];
    assert!(baskets.has_submenu());
    let create = &baskets.children[0].items[0];
    assert_eq!(create.key, "basket.create");

    create.activate();
    h.controller.tick();
    assert!(h.controller.ui.baskets.dialog.is_some());
}

#[test]
fn remove_menu_item_acts_on_the_triggered_row() {
    let mut h = ControllerHarness::new();
    let mut seed = h.seed_store();
    let file_id = seed_file(&mut seed, "/art", "a.png");
    seed_file(&mut seed, "/art", "b.png");

    let handles = register_menus(
        &h.controller.menu_registry(),
        h.controller.command_queue(),
    );

    h.controller.load_files("/art".into(), true);
    h.wait_until("file rows", |c| c.ui.browser.rows.len() == 2);

    handles.file.trigger_with(
        &PointerEvent::new(120, 80),
        MenuContext::File {
            id: file_id.clone(),
        },
    );
    let remove = &handles.file.definition().groups[0].items[1];
    assert_eq!(remove.key, "remove");
    remove.activate();
    h.controller.tick();

    assert_eq!(h.controller.ui.browser.rows.len(), 1);
    assert!(h.controller.ui.browser.rows.iter().all(|r| r.id != file_id));
}

#[test]
fn mounting_menus_twice_shares_the_same_state() {
    let h = ControllerHarness::new();
    let registry = h.controller.menu_registry();
    let first = register_menus(&registry, h.controller.command_queue());
    let second = register_menus(&registry, h.controller.command_queue());

    assert!(first.main.shares_display_with(&second.main));
    assert!(first.file.shares_display_with(&second.file));
    assert!(first.file.shares_definition_with(&second.file));

    first.main.trigger(&PointerEvent::new(33, 44));
    let display = second.main.display();
    assert!(display.visible);
    assert_eq!(display.position.x, 33);
    assert_eq!(display.position.y, 44);
}
