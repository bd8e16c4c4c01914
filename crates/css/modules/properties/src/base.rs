//! The toolkit's base property set.

use crate::{PropertyRegistry, ShorthandKind};

/// `(name, default, inherited)`
const BASE_PROPERTIES: &[(&str, &str, bool)] = &[
    ("id", "", false),
    ("class", "", false),
    ("x", "", false),
    ("y", "", false),
    ("width", "", false),
    ("height", "", false),
    ("min-width", "", false),
    ("min-height", "", false),
    ("max-width", "", false),
    ("max-height", "", false),
    ("visible", "true", false),
    ("enabled", "true", false),
    ("skin", "", false),
    ("skin-color", "", false),
    ("gravity", "", false),
    ("tooltip", "", false),
    ("opacity", "1", false),
    ("rotation", "0", false),
    ("scale", "1", false),
    ("rotation-origin-point-x", "50%", false),
    ("rotation-origin-point-y", "50%", false),
    ("scale-origin-point-x", "50%", false),
    ("scale-origin-point-y", "50%", false),
    ("clip", "", false),
    ("blend-mode", "", false),
    ("tint", "", false),
    ("cursor", "arrow", true),
    // Text
    ("color", "#000000", true),
    ("font-family", "sans-serif", true),
    ("font-size", "12dp", true),
    ("font-style", "normal", true),
    ("line-spacing", "0", true),
    ("text-align", "left", true),
    ("text-transform", "none", true),
    ("text-stroke-width", "0", true),
    ("text-stroke-color", "transparent", true),
    ("text-shadow-color", "transparent", true),
    ("text-shadow-offset", "0 0", true),
    ("selection-color", "", true),
    ("selection-back-color", "", true),
    ("hint-color", "", true),
    // Background and foreground
    ("background-color", "transparent", false),
    ("background-position-x", "center", false),
    ("background-position-y", "center", false),
    ("background-size", "auto", false),
    ("foreground-color", "transparent", false),
    ("foreground-position-x", "center", false),
    ("foreground-position-y", "center", false),
    ("foreground-size", "auto", false),
    ("foreground-radius", "0", false),
    // Box edges
    ("margin-top", "0", false),
    ("margin-right", "0", false),
    ("margin-bottom", "0", false),
    ("margin-left", "0", false),
    ("padding-top", "0", false),
    ("padding-right", "0", false),
    ("padding-bottom", "0", false),
    ("padding-left", "0", false),
    ("border-type", "inside", false),
    ("border-top-color", "transparent", false),
    ("border-right-color", "transparent", false),
    ("border-bottom-color", "transparent", false),
    ("border-left-color", "transparent", false),
    ("border-top-width", "0", false),
    ("border-right-width", "0", false),
    ("border-bottom-width", "0", false),
    ("border-left-width", "0", false),
    ("border-top-left-radius", "0", false),
    ("border-top-right-radius", "0", false),
    ("border-bottom-right-radius", "0", false),
    ("border-bottom-left-radius", "0", false),
    ("border-smooth", "false", false),
    // Layout
    ("layout-weight", "", false),
    ("layout-gravity", "", false),
    ("layout-width", "", false),
    ("layout-height", "", false),
    ("column-margin", "0", false),
    ("row-margin", "0", false),
    // Transitions
    ("transition-property", "", false),
    ("transition-duration", "0s", false),
    ("transition-delay", "0s", false),
    ("transition-timing-function", "linear", false),
    // Animations
    ("animation-name", "", false),
    ("animation-duration", "0s", false),
    ("animation-delay", "0s", false),
    ("animation-timing-function", "linear", false),
    ("animation-iteration-count", "1", false),
    ("animation-direction", "normal", false),
    ("animation-fill-mode", "none", false),
    ("animation-play-state", "running", false),
];

/// Comma-separated list properties.
const INDEXED_PROPERTIES: &[(&str, &str)] = &[
    ("background-image", "none"),
    ("background-tint", ""),
    ("background-repeat", "no-repeat"),
    ("foreground-image", "none"),
    ("foreground-tint", ""),
    ("foreground-repeat", "no-repeat"),
    ("transition", ""),
    ("animation", ""),
];

/// `(property, alias)`
const ALIASES: &[(&str, &str)] = &[
    ("font-family", "font-name"),
    ("font-style", "text-style"),
    ("font-style", "text-decoration"),
    ("rotation", "rotate"),
    ("layout-gravity", "layout_gravity"),
    ("layout-gravity", "lg"),
    ("layout-width", "layout_width"),
    ("layout-width", "lw"),
    ("layout-height", "layout_height"),
    ("layout-height", "lh"),
    ("layout-weight", "layout_weight"),
];

const SHORTHANDS: &[(&str, &[&str], ShorthandKind)] = &[
    (
        "margin",
        &["margin-top", "margin-right", "margin-bottom", "margin-left"],
        ShorthandKind::Box,
    ),
    (
        "padding",
        &["padding-top", "padding-right", "padding-bottom", "padding-left"],
        ShorthandKind::Box,
    ),
    (
        "border-color",
        &[
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
        ShorthandKind::Box,
    ),
    (
        "border-width",
        &[
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
        ShorthandKind::Box,
    ),
    (
        "border-radius",
        &[
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
        ],
        ShorthandKind::Box,
    ),
    ("min-size", &["min-width", "min-height"], ShorthandKind::Pair),
    ("max-size", &["max-width", "max-height"], ShorthandKind::Pair),
    ("box-margin", &["column-margin", "row-margin"], ShorthandKind::Pair),
    (
        "background-position",
        &["background-position-x", "background-position-y"],
        ShorthandKind::Pair,
    ),
    (
        "foreground-position",
        &["foreground-position-x", "foreground-position-y"],
        ShorthandKind::Pair,
    ),
    (
        "rotation-origin-point",
        &["rotation-origin-point-x", "rotation-origin-point-y"],
        ShorthandKind::Pair,
    ),
    (
        "scale-origin-point",
        &["scale-origin-point-x", "scale-origin-point-y"],
        ShorthandKind::Pair,
    ),
];

impl PropertyRegistry {
    /// A registry holding the toolkit's base properties, aliases and shorthands.
    pub fn with_base_properties() -> Self {
        let mut registry = Self::new();
        for &(name, default_value, inherited) in BASE_PROPERTIES {
            registry.register_property(name, default_value, inherited);
        }
        for &(name, default_value) in INDEXED_PROPERTIES {
            registry.register_indexed_property(name, default_value, false);
        }
        for &(name, alias) in ALIASES {
            registry.add_alias(name, alias);
        }
        for &(name, longhands, kind) in SHORTHANDS {
            registry.register_shorthand(name, longhands, kind);
        }
        registry
    }
}
