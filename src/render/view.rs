//! View model
//!
//! Pure projection from game state and preferences to what the page shows.
//! The DOM layer only copies these values out.

use crate::settings::Settings;
use crate::sim::{GameState, Outcome, Stage};

pub const START_LABEL: &str = "Play VAR";

/// Overlay headline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marquee {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub number: u32,
    /// Lower numbers stack on top
    pub z_index: u32,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub app_class: String,
    pub overlay_class: String,
    /// Nothing shown while a round is running
    pub marquee: Option<Marquee>,
    pub status: &'static str,
    pub tiles: Vec<TileView>,
    pub experimental_class: String,
    pub tile_count: u32,
}

/// Join `base` with every class whose flag is set
pub fn class_names(base: &str, flags: &[(&str, bool)]) -> String {
    let mut out = base.to_string();
    for (name, on) in flags {
        if *on {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(name);
        }
    }
    out
}

pub fn marquee(state: &GameState) -> Option<Marquee> {
    match (state.stage, state.outcome) {
        (Stage::Pregame, _) => Some(Marquee {
            title: "Finger Print Not Recognized",
            subtitle: Some("Proof of Training Required"),
        }),
        (Stage::Postgame, Outcome::Passed) => Some(Marquee {
            title: "Security Clearance Accepted",
            subtitle: None,
        }),
        (Stage::Postgame, Outcome::Failed) => Some(Marquee {
            title: "Failed Security Clearance",
            subtitle: None,
        }),
        _ => None,
    }
}

pub fn project(state: &GameState, settings: &Settings) -> ViewModel {
    let count = state.tile_count;
    let tiles = (1..=count)
        .map(|number| TileView {
            number,
            z_index: count - number + 1,
            class: class_names("tile", &[("correct", state.is_confirmed(number))]),
        })
        .collect();

    ViewModel {
        app_class: class_names(
            "app",
            &[
                ("is-playing", state.stage == Stage::Playing),
                ("is-learning", state.stage == Stage::Learning),
                ("show-outlines", settings.show_outlines),
            ],
        ),
        overlay_class: class_names("overlay", &[("hidden", state.stage.is_active())]),
        marquee: marquee(state),
        status: state.outcome.label(),
        tiles,
        experimental_class: class_names(
            "control-group test-group",
            &[("hidden", !settings.show_experimental)],
        ),
        tile_count: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!(class_names("tile", &[("correct", false)]), "tile");
        assert_eq!(
            class_names("app", &[("is-playing", true), ("x", false), ("show-outlines", true)]),
            "app is-playing show-outlines"
        );
        assert_eq!(class_names("", &[("hidden", true)]), "hidden");
    }

    #[test]
    fn test_pregame_view() {
        let view = project(&GameState::new(3), &Settings::default());
        assert_eq!(view.app_class, "app");
        assert_eq!(view.overlay_class, "overlay");
        assert_eq!(
            view.marquee.unwrap().subtitle,
            Some("Proof of Training Required")
        );
        assert_eq!(view.status, "");
        assert_eq!(view.experimental_class, "control-group test-group hidden");
        let z: Vec<u32> = view.tiles.iter().map(|t| t.z_index).collect();
        assert_eq!(z, vec![3, 2, 1]);
    }

    #[test]
    fn test_learning_hides_overlay() {
        let mut state = GameState::new(4);
        state.stage = Stage::Learning;
        state.expected = 3;
        let mut settings = Settings::default();
        settings.show_outlines = true;
        settings.show_experimental = true;

        let view = project(&state, &settings);
        assert_eq!(view.app_class, "app is-learning show-outlines");
        assert_eq!(view.overlay_class, "overlay hidden");
        assert!(view.marquee.is_none());
        assert_eq!(view.experimental_class, "control-group test-group");
        let classes: Vec<&str> = view.tiles.iter().map(|t| t.class.as_str()).collect();
        assert_eq!(classes, vec!["tile correct", "tile correct", "tile", "tile"]);
    }

    #[test]
    fn test_postgame_views() {
        let mut state = GameState::new(2);
        state.stage = Stage::Postgame;
        state.outcome = Outcome::Passed;
        state.expected = 2;
        let view = project(&state, &Settings::default());
        assert_eq!(view.marquee.unwrap().title, "Security Clearance Accepted");
        assert_eq!(view.status, "Passed");
        assert!(view.tiles.iter().all(|t| t.class == "tile correct"));

        state.outcome = Outcome::Failed;
        state.expected = 1;
        let view = project(&state, &Settings::default());
        assert_eq!(view.marquee.unwrap().title, "Failed Security Clearance");
        assert_eq!(view.overlay_class, "overlay");
        assert!(view.tiles.iter().all(|t| t.class == "tile"));
    }
}
