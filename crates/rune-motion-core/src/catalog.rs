//! Built-in preset effects.
//!
//! Each preset is a reserved logical name mapped to a keyframe description.
//! The controller factory registers a preset the first time it is requested.

use crate::keyframes::KeyframeDescription;

type Step = (&'static str, &'static [(&'static str, &'static str)]);

struct Preset {
    name: &'static str,
    steps: &'static [Step],
}

const PERSPECTIVE: &str = "perspective(400px)";

const PRESETS: &[Preset] = &[
    Preset {
        name: "flash",
        steps: &[("0,50,100", &[("opacity", "1")]), ("25,75", &[("opacity", "0")])],
    },
    Preset {
        name: "shake",
        steps: &[
            ("0,100", &[("transform", "translate3d(0, 0, 0)")]),
            ("10, 30, 50, 70, 90", &[("transform", "translate3d(-10px, 0, 0)")]),
            ("20, 40, 60, 80", &[("transform", "translate3d(10px, 0, 0)")]),
        ],
    },
    Preset {
        name: "swing",
        steps: &[
            ("20", &[("transform", "rotate3d(0, 0, 1, 15deg)")]),
            ("40", &[("transform", "rotate3d(0, 0, 1, -10deg)")]),
            ("60", &[("transform", "rotate3d(0, 0, 1, 5deg)")]),
            ("80", &[("transform", "rotate3d(0, 0, 1, -5deg)")]),
            ("100", &[("transform", "rotate3d(0, 0, 1, 0deg)")]),
        ],
    },
    Preset {
        name: "wobble",
        steps: &[
            ("0", &[("transform", "none")]),
            ("15", &[("transform", "translate3d(-25%, 0, 0) rotate3d(0, 0, 1, -5deg)")]),
            ("30", &[("transform", "translate3d(20%, 0, 0) rotate3d(0, 0, 1, 3deg)")]),
            ("45", &[("transform", "translate3d(-15%, 0, 0) rotate3d(0, 0, 1, -3deg)")]),
            ("60", &[("transform", "translate3d(10%, 0, 0) rotate3d(0, 0, 1, 2deg)")]),
            ("75", &[("transform", "translate3d(-5%, 0, 0) rotate3d(0, 0, 1, -1deg)")]),
            ("100", &[("transform", "none")]),
        ],
    },
    Preset {
        name: "bounceIn",
        steps: &[
            ("0", &[("opacity", "0"), ("transform", "scale3d(.3, .3, .3)")]),
            ("20", &[("transform", "scale3d(1.1, 1.1, 1.1)")]),
            ("40", &[("transform", "scale3d(.9, .9, .9)")]),
            ("60", &[("opacity", "1"), ("transform", "scale3d(1.03, 1.03, 1.03)")]),
            ("80", &[("transform", "scale3d(.97, .97, .97)")]),
            ("100", &[("opacity", "1"), ("transform", "scale3d(1, 1, 1)")]),
        ],
    },
    Preset {
        name: "bounceInLeft",
        steps: &[
            ("0", &[("opacity", "0"), ("transform", "translate3d(-3000px, 0, 0)")]),
            ("60", &[("opacity", "1"), ("transform", "translate3d(25px, 0, 0)")]),
            ("75", &[("transform", "translate3d(-10px, 0, 0)")]),
            ("90", &[("transform", "translate3d(5px, 0, 0)")]),
            ("100", &[("transform", "none")]),
        ],
    },
    Preset {
        name: "bounceInRight",
        steps: &[
            ("0", &[("opacity", "0"), ("transform", "translate3d(3000px, 0, 0)")]),
            ("60", &[("opacity", "1"), ("transform", "translate3d(-25px, 0, 0)")]),
            ("75", &[("transform", "translate3d(10px, 0, 0)")]),
            ("90", &[("transform", "translate3d(-5px, 0, 0)")]),
            ("100", &[("transform", "none")]),
        ],
    },
    Preset {
        name: "bounceOut",
        steps: &[
            ("0", &[("transform", "scale3d(.9, .9, .9)")]),
            ("50,55", &[("transform", "scale3d(1.1, 1.1, 1.1)")]),
            ("100", &[("opacity", "0"), ("transform", "scale3d(.3, .3, .3)")]),
        ],
    },
    Preset {
        name: "bounceOutLeft",
        steps: &[
            ("20", &[("opacity", "1"), ("transform", "translate3d(20px, 0, 0)")]),
            ("100", &[("opacity", "0"), ("transform", "translate3d(-2000px, 0, 0)")]),
        ],
    },
    Preset {
        name: "bounceOutRight",
        steps: &[
            ("20", &[("opacity", "1"), ("transform", "translate3d(-20px, 0, 0)")]),
            ("100", &[("opacity", "0"), ("transform", "translate3d(2000px, 0, 0)")]),
        ],
    },
    Preset {
        name: "fadeIn",
        steps: &[("0", &[("opacity", "0")]), ("100", &[("opacity", "1")])],
    },
    Preset {
        name: "fadeOut",
        steps: &[("0", &[("opacity", "1")]), ("100", &[("opacity", "0")])],
    },
    Preset {
        name: "flip",
        steps: &[
            ("0", &[("transform", "perspective(400px) rotate3d(0, 1, 0, -360deg)")]),
            ("40", &[("transform", "perspective(400px) rotate3d(0, 1, 0, -190deg)")]),
            ("60", &[("transform", "perspective(400px) rotate3d(0, 1, 0, -170deg)")]),
            (
                "80",
                &[
                    ("transform", "perspective(400px) scale3d(.95, .95, .95)"),
                    ("animation-timing-function", "ease-in"),
                ],
            ),
            (
                "100",
                &[("transform", PERSPECTIVE), ("animation-timing-function", "ease-in")],
            ),
        ],
    },
    Preset {
        name: "flipInX",
        steps: &[
            ("0", &[("transform", "perspective(400px) rotate3d(1, 0, 0, 90deg)")]),
            ("40", &[("transform", "perspective(400px) rotate3d(1, 0, 0, -20deg)")]),
            ("60", &[("transform", "perspective(400px) rotate3d(1, 0, 0, 10deg)")]),
            ("80", &[("transform", "perspective(400px) rotate3d(1, 0, 0, -5deg)")]),
            ("100", &[("transform", PERSPECTIVE)]),
        ],
    },
    Preset {
        name: "flipInY",
        steps: &[
            ("0", &[("transform", "perspective(400px) rotate3d(0, 1, 0, 90deg)")]),
            ("40", &[("transform", "perspective(400px) rotate3d(0, 1, 0, -20deg)")]),
            ("60", &[("transform", "perspective(400px) rotate3d(0, 1, 0, 10deg)")]),
            ("80", &[("transform", "perspective(400px) rotate3d(0, 1, 0, -5deg)")]),
            ("100", &[("transform", PERSPECTIVE)]),
        ],
    },
    Preset {
        name: "flipOutX",
        steps: &[
            ("0", &[("transform", PERSPECTIVE)]),
            (
                "30",
                &[("transform", "perspective(400px) rotate3d(1, 0, 0, -20deg)"), ("opacity", "1")],
            ),
            (
                "100",
                &[("transform", "perspective(400px) rotate3d(1, 0, 0, 90deg)"), ("opacity", "0")],
            ),
        ],
    },
    Preset {
        name: "flipOutY",
        steps: &[
            ("0", &[("transform", PERSPECTIVE)]),
            (
                "30",
                &[("transform", "perspective(400px) rotate3d(0, 1, 0, -20deg)"), ("opacity", "1")],
            ),
            (
                "100",
                &[("transform", "perspective(400px) rotate3d(0, 1, 0, 90deg)"), ("opacity", "0")],
            ),
        ],
    },
    Preset {
        name: "rollIn",
        steps: &[
            (
                "0",
                &[
                    ("transform", "translate3d(-100%, 0, 0) rotate3d(0, 0, 1, -120deg)"),
                    ("opacity", "0"),
                ],
            ),
            ("100", &[("transform", "none"), ("opacity", "1")]),
        ],
    },
    Preset {
        name: "rollOut",
        steps: &[
            ("0", &[("transform", "none"), ("opacity", "1")]),
            (
                "100",
                &[
                    ("transform", "translate3d(100%, 0, 0) rotate3d(0, 0, 1, 120deg)"),
                    ("opacity", "0"),
                ],
            ),
        ],
    },
    Preset {
        name: "zoomIn",
        steps: &[
            ("0", &[("transform", "scale3d(.3, .3, .3)"), ("opacity", "0")]),
            ("50", &[("opacity", "1")]),
        ],
    },
    Preset {
        name: "zoomOut",
        steps: &[
            ("0", &[("opacity", "1")]),
            ("50", &[("transform", "scale3d(.3, .3, .3)"), ("opacity", "0")]),
            ("100", &[("opacity", "0")]),
        ],
    },
];

/// Static table of preset effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectCatalog;

impl EffectCatalog {
    /// Keyframes of a preset, or `None` if `name` is not reserved.
    pub fn get(name: &str) -> Option<KeyframeDescription> {
        PRESETS
            .iter()
            .find(|preset| preset.name == name)
            .map(|preset| {
                preset
                    .steps
                    .iter()
                    .fold(KeyframeDescription::new(), |desc, (offsets, props)| {
                        desc.frame(offsets, props.iter().copied())
                    })
            })
    }

    pub fn contains(name: &str) -> bool {
        PRESETS.iter().any(|preset| preset.name == name)
    }

    /// Preset names in catalog order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|preset| preset.name)
    }
}
