//! DOM writer
//!
//! Expects the page shell from `index.html`: `#app`, `#boundary` holding
//! `#tiles` and the overlay, the marquee elements and the toolbar.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::view::{START_LABEL, ViewModel};
use crate::anim::Timeline;

fn set_class(document: &Document, id: &str, class: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        if el.get_attribute("class").as_deref() != Some(class) {
            let _ = el.set_attribute("class", class);
        }
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

/// Recreate the tile elements for `count` tiles
pub fn build_tiles(document: &Document, count: u32) -> Result<(), JsValue> {
    let container = document
        .get_element_by_id("tiles")
        .ok_or_else(|| JsValue::from_str("missing #tiles"))?;
    container.set_inner_html("");

    for number in 1..=count {
        let tile = document.create_element("div")?;
        tile.set_id(&format!("tile-{}", number));
        tile.set_attribute("class", "tile")?;
        tile.set_attribute("data-number", &number.to_string())?;
        tile.set_text_content(Some(&number.to_string()));
        container.append_child(&tile)?;
    }
    log::debug!("Built {} tiles", count);
    Ok(())
}

/// Copy the view model onto the page
pub fn apply_view(document: &Document, view: &ViewModel) {
    set_class(document, "app", &view.app_class);
    set_class(document, "overlay", &view.overlay_class);
    set_class(document, "experimental", &view.experimental_class);
    set_text(document, "start", START_LABEL);
    set_text(document, "status", view.status);

    match &view.marquee {
        Some(marquee) => {
            set_class(document, "marquee", "marquee");
            set_text(document, "marquee-title", marquee.title);
            set_text(document, "marquee-subtitle", marquee.subtitle.unwrap_or(""));
            set_class(
                document,
                "marquee-subtitle",
                if marquee.subtitle.is_some() { "" } else { "hidden" },
            );
        }
        None => set_class(document, "marquee", "marquee hidden"),
    }

    for tile in &view.tiles {
        let id = format!("tile-{}", tile.number);
        set_class(document, &id, &tile.class);
        if let Some(el) = document
            .get_element_by_id(&id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("z-index", &tile.z_index.to_string());
        }
    }
}

/// Show the current tile count in the input
pub fn set_count_input(document: &Document, count: u32) {
    if let Some(input) = document
        .get_element_by_id("count")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(&count.to_string());
    }
}

/// Move tile elements to their animated positions
pub fn apply_positions(document: &Document, timeline: &Timeline) {
    for (tile, pos) in timeline.positions() {
        if let Some(el) = document
            .get_element_by_id(&format!("tile-{}", tile))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let transform = format!("translate({:.1}px, {:.1}px)", pos.x, pos.y);
            let _ = el.style().set_property("transform", &transform);
        }
    }
}
