//! Declaration injection.

use crate::config::Configuration;
use crate::parser::{Declaration, RuleBlock};

/// One of the GPU-promoting declarations the transformer can append.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GpuProperty {
    /// `transform: translateZ(0)`
    Transform,
    /// `will-change: transform`
    WillChange,
    /// `backface-visibility: hidden`
    BackfaceVisibility,
    /// `perspective: 1000px`
    Perspective,
}

impl GpuProperty {
    /// All properties in injection order.
    pub const ALL: [GpuProperty; 4] = [
        GpuProperty::Transform,
        GpuProperty::WillChange,
        GpuProperty::BackfaceVisibility,
        GpuProperty::Perspective,
    ];

    pub fn property(self) -> &'static str {
        match self {
            GpuProperty::Transform => "transform",
            GpuProperty::WillChange => "will-change",
            GpuProperty::BackfaceVisibility => "backface-visibility",
            GpuProperty::Perspective => "perspective",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            GpuProperty::Transform => "translateZ(0)",
            GpuProperty::WillChange => "transform",
            GpuProperty::BackfaceVisibility => "hidden",
            GpuProperty::Perspective => "1000px",
        }
    }

    pub fn declaration(self) -> Declaration {
        Declaration::new(self.property(), self.value())
    }
}

/// Appends every enabled GPU declaration to `rule`, returning how many were
/// added.
///
/// Existing declarations are left untouched and no duplicate check is made:
/// applying twice appends twice.
pub fn apply_gpu_properties(rule: &mut RuleBlock, config: &Configuration) -> usize {
    let before = rule.declarations.len();
    rule.declarations
        .extend(config.enabled_properties().map(GpuProperty::declaration));
    rule.declarations.len() - before
}
