//! Card features.
//!
//! A card has one `Trio` value on each of four independent axes. The engine
//! never interprets the values; a presentation layer maps them to a count
//! (1, 2, 3), a shape, a shading, and a color.
//!
//! ## Completing a Set
//!
//! On every axis, three values form a Set when they are all equal or all
//! different. So for any two values there is exactly one third value that
//! works, and for any two cards exactly one feature combination completes
//! the Set.
//!
//! ```
//! use set_engine::cards::Trio;
//!
//! assert_eq!(Trio::third(Trio::Zero, Trio::Zero), Trio::Zero);
//! assert_eq!(Trio::third(Trio::Zero, Trio::Two), Trio::One);
//! ```

use serde::{Deserialize, Serialize};

/// One of exactly three feature values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trio {
    Zero,
    One,
    Two,
}

impl Trio {
    /// All values in index order.
    pub const ALL: [Trio; 3] = [Trio::Zero, Trio::One, Trio::Two];

    /// Index of this value (0, 1, or 2).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The value that makes `a`, `b`, and the result a valid axis.
    #[must_use]
    pub const fn third(a: Trio, b: Trio) -> Trio {
        // Indices of a valid axis always sum to a multiple of 3.
        match (6 - a.index() - b.index()) % 3 {
            0 => Trio::Zero,
            1 => Trio::One,
            _ => Trio::Two,
        }
    }
}

/// The four feature axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureAxis {
    Count,
    Shape,
    Shading,
    Color,
}

impl FeatureAxis {
    /// All axes in enumeration order.
    pub const ALL: [FeatureAxis; 4] = [
        FeatureAxis::Count,
        FeatureAxis::Shape,
        FeatureAxis::Shading,
        FeatureAxis::Color,
    ];
}

/// Feature values of a card, one per axis.
///
/// Features are a value type: two cards may compare equal here and still be
/// different cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Features {
    pub count: Trio,
    pub shape: Trio,
    pub shading: Trio,
    pub color: Trio,
}

impl Features {
    /// Create features from one value per axis.
    #[must_use]
    pub const fn new(count: Trio, shape: Trio, shading: Trio, color: Trio) -> Self {
        Self {
            count,
            shape,
            shading,
            color,
        }
    }

    /// Value on the given axis.
    #[must_use]
    pub const fn get(&self, axis: FeatureAxis) -> Trio {
        match axis {
            FeatureAxis::Count => self.count,
            FeatureAxis::Shape => self.shape,
            FeatureAxis::Shading => self.shading,
            FeatureAxis::Color => self.color,
        }
    }

    /// The only features that form a Set with `a` and `b`.
    #[must_use]
    pub const fn completing(a: &Features, b: &Features) -> Features {
        Features {
            count: Trio::third(a.count, b.count),
            shape: Trio::third(a.shape, b.shape),
            shading: Trio::third(a.shading, b.shading),
            color: Trio::third(a.color, b.color),
        }
    }

    /// Iterate over all 81 feature combinations, count-major.
    pub fn all() -> impl Iterator<Item = Features> {
        Trio::ALL.into_iter().flat_map(|count| {
            Trio::ALL.into_iter().flat_map(move |shape| {
                Trio::ALL.into_iter().flat_map(move |shading| {
                    Trio::ALL
                        .into_iter()
                        .map(move |color| Features::new(count, shape, shading, color))
                })
            })
        })
    }
}

impl std::fmt::Display for Features {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.count.index(),
            self.shape.index(),
            self.shading.index(),
            self.color.index()
        )
    }
}
