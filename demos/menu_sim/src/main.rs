use megamenu::prelude::*;
use std::time::Duration;

struct Page {
    doc: Document,
    root: ElementId,
    shop: ElementId,
    services: ElementId,
}

fn build_page() -> Page {
    let mut doc = Document::new(Vector2::new(1200.0, 800.0));
    let body = doc.body();
    let root = doc.create_element_at(
        body,
        &["wp-block-megamenu", markers::COLLAPSIBLE],
        Rect::new(0.0, 0.0, 1200.0, 60.0),
    );
    doc.set_data(root, markers::DATA_BREAKPOINT, "900");
    doc.set_data(root, markers::DATA_DROPDOWN_WIDTH, "1000");

    let item = |doc: &mut Document, x: f64, panel: Rect| {
        let item = doc.create_element_at(
            root,
            &[markers::ITEM, markers::HAS_CHILDREN],
            Rect::new(x, 0.0, x + 100.0, 60.0),
        );
        doc.create_element(item, &[markers::LINK]);
        let dropdown = doc.create_element_at(item, &[markers::DROPDOWN], panel);
        doc.create_element(dropdown, &[markers::DROPDOWN_CONTENT]);
        item
    };
    let shop = item(&mut doc, 100.0, Rect::new(0.0, 60.0, 600.0, 400.0));
    let services = item(&mut doc, 300.0, Rect::new(250.0, 60.0, 450.0, 300.0));
    doc.create_element(root, &[markers::ITEM]);
    doc.create_element(body, &["wp-block-megamenu__toggle"]);

    Page {
        doc,
        root,
        shop,
        services,
    }
}

fn report(step: &str, menu: &MegaMenuController) {
    println!(
        "{:<28} mode={:?} level={} icon={:?} path={:?}",
        step,
        menu.mode(),
        menu.current_level(),
        menu.hamburger().icon_state(),
        menu.open_path()
    );
}

/// Advance the clock to the next deadline and run it.
fn wait_for_timers(page: &mut Page, menu: &mut MegaMenuController) {
    while let Some(deadline) = menu.next_deadline() {
        let now = page.doc.now();
        if deadline > now {
            page.doc.advance(deadline - now);
        }
        menu.tick(&mut page.doc);
    }
}

fn main() {
    let (registry, load_error) = match smol::block_on(SettingsRegistry::new()) {
        Ok(registry) => (registry, None),
        Err(e) => (SettingsRegistry::with_defaults(), Some(e)),
    };

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(filter) = registry.get().log_filter() {
        logger.parse_filters(&filter);
    }
    logger.init();

    if let Some(e) = load_error {
        log::warn!("Using default settings: {}", e);
    }

    let mut page = build_page();
    let mut menu = MegaMenuController::new(&page.doc, page.root, Box::new(BodyScrollLock::new()))
        .with_timings(registry.timings());
    menu.mount(&mut page.doc);
    report("mounted", &menu);

    menu.handle_event(&mut page.doc, MenuEvent::PointerEnter(page.services));
    report("hover services", &menu);
    menu.handle_event(&mut page.doc, MenuEvent::PointerLeave(page.services));
    page.doc.advance(Duration::from_millis(100));
    menu.tick(&mut page.doc);
    report("left services (100ms)", &menu);
    wait_for_timers(&mut page, &mut menu);
    report("hover intent expired", &menu);

    let response = menu.handle_event(&mut page.doc, MenuEvent::Click(page.shop));
    report("click shop", &menu);
    println!("{:<28} {:?}", "  response", response);

    page.doc.set_viewport_width(600.0);
    menu.handle_event(&mut page.doc, MenuEvent::Resize);
    report("resize to 600px", &menu);

    menu.handle_event(&mut page.doc, MenuEvent::ToggleClick);
    report("toggle", &menu);
    menu.handle_event(&mut page.doc, MenuEvent::Click(page.shop));
    report("tap shop", &menu);
    menu.handle_event(&mut page.doc, MenuEvent::ToggleClick);
    menu.handle_event(&mut page.doc, MenuEvent::ToggleClick);
    report("toggle twice", &menu);

    menu.dispose();
}
