//! Shadow descriptions
//!
//! A shadow is attached to a projective light and describes the depth map
//! rendered from that light plus how strongly it attenuates.
//!
//! - **Mapped basic**: a single depth map compared per fragment
//! - **Mapped basic soft**: basic mapping followed by a screen-space blur
//! - **Mapped variance**: a two-moment map filtered like a color texture

mod builder;

pub use builder::{ShadowMappedBasicBuilder, ShadowMappedBasicSoftBuilder, ShadowMappedVarianceBuilder};

use crate::core::config::ShadowDefaults;
use crate::error::{StructuralError, StructuralResult};
use crate::graphics::{
    DepthPrecision, DepthVariancePrecision, TextureFilterMagnification, TextureFilterMinification,
};

/// Smallest accepted shadow map size exponent (2x2 texels)
pub const SIZE_EXPONENT_MIN: u32 = 1;

/// Largest accepted shadow map size exponent (65536x65536 texels)
pub const SIZE_EXPONENT_MAX: u32 = 16;

/// Physical parameters of a shadow map
///
/// `P` is the precision type: [`DepthPrecision`] for basic maps,
/// [`DepthVariancePrecision`] for variance maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShadowMapDescription<P> {
    size_exponent: u32,
    precision: P,
    filter_minification: TextureFilterMinification,
    filter_magnification: TextureFilterMagnification,
}

/// Description of a basic depth shadow map
pub type DepthMapDescription = ShadowMapDescription<DepthPrecision>;

/// Description of a variance shadow map
pub type VarianceMapDescription = ShadowMapDescription<DepthVariancePrecision>;

impl<P: Copy> ShadowMapDescription<P> {
    /// Create a map description, validating the size exponent
    pub fn new(
        size_exponent: u32,
        precision: P,
        filter_minification: TextureFilterMinification,
        filter_magnification: TextureFilterMagnification,
    ) -> StructuralResult<Self> {
        if !(SIZE_EXPONENT_MIN..=SIZE_EXPONENT_MAX).contains(&size_exponent) {
            return Err(StructuralError::invalid(
                "size_exponent",
                format!("{size_exponent} outside [{SIZE_EXPONENT_MIN}, {SIZE_EXPONENT_MAX}]"),
            ));
        }

        Ok(Self {
            size_exponent,
            precision,
            filter_minification,
            filter_magnification,
        })
    }

    /// Size exponent `n`
    pub const fn size_exponent(&self) -> u32 {
        self.size_exponent
    }

    /// Texel dimension of the square map, `2^n`
    pub const fn size(&self) -> u32 {
        1 << self.size_exponent
    }

    /// Storage precision
    pub const fn precision(&self) -> P {
        self.precision
    }

    /// Minification filter
    pub const fn filter_minification(&self) -> TextureFilterMinification {
        self.filter_minification
    }

    /// Magnification filter
    pub const fn filter_magnification(&self) -> TextureFilterMagnification {
        self.filter_magnification
    }
}

impl DepthMapDescription {
    /// Basic map description from configured defaults
    pub fn from_defaults(defaults: &ShadowDefaults) -> StructuralResult<Self> {
        Self::new(
            defaults.size_exponent,
            defaults.precision,
            defaults.filter_minification,
            defaults.filter_magnification,
        )
    }
}

impl VarianceMapDescription {
    /// Variance map description from configured defaults
    pub fn from_defaults(defaults: &ShadowDefaults) -> StructuralResult<Self> {
        Self::new(
            defaults.size_exponent,
            defaults.variance_precision,
            defaults.filter_minification,
            defaults.filter_magnification,
        )
    }
}

/// Basic depth-compared shadow
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowMappedBasic {
    pub(crate) map: DepthMapDescription,
    pub(crate) depth_bias: f32,
    pub(crate) factor_minimum: f32,
}

impl ShadowMappedBasic {
    /// Shadow map description
    pub const fn map(&self) -> &DepthMapDescription {
        &self.map
    }

    /// Depth bias applied before comparison
    pub const fn depth_bias(&self) -> f32 {
        self.depth_bias
    }

    /// Minimum light factor inside shadow
    pub const fn factor_minimum(&self) -> f32 {
        self.factor_minimum
    }
}

/// Basic shadow softened by a screen-space blur
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowMappedBasicSoft {
    pub(crate) basic: ShadowMappedBasic,
    pub(crate) blur_radius: f32,
    pub(crate) blur_passes: u32,
}

impl ShadowMappedBasicSoft {
    /// The underlying basic shadow
    pub const fn basic(&self) -> &ShadowMappedBasic {
        &self.basic
    }

    /// Blur radius in screen texels
    pub const fn blur_radius(&self) -> f32 {
        self.blur_radius
    }

    /// Number of blur passes
    pub const fn blur_passes(&self) -> u32 {
        self.blur_passes
    }
}

/// Variance shadow
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowMappedVariance {
    pub(crate) map: VarianceMapDescription,
    pub(crate) factor_minimum: f32,
    pub(crate) minimum_variance: f32,
    pub(crate) light_bleed_reduction: f32,
}

impl ShadowMappedVariance {
    /// Shadow map description
    pub const fn map(&self) -> &VarianceMapDescription {
        &self.map
    }

    /// Minimum light factor inside shadow
    pub const fn factor_minimum(&self) -> f32 {
        self.factor_minimum
    }

    /// Lower clamp applied to the computed variance
    pub const fn minimum_variance(&self) -> f32 {
        self.minimum_variance
    }

    /// Light bleed reduction amount in `[0, 1)`
    pub const fn light_bleed_reduction(&self) -> f32 {
        self.light_bleed_reduction
    }
}

/// Closed set of shadow variants
#[derive(Debug, Clone, PartialEq)]
pub enum Shadow {
    /// Basic depth shadow
    MappedBasic(ShadowMappedBasic),
    /// Basic shadow with screen-space softening
    MappedBasicSoft(ShadowMappedBasicSoft),
    /// Variance shadow
    MappedVariance(ShadowMappedVariance),
}

impl Shadow {
    /// Stable code used for shader permutation keys
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MappedBasic(_) => "SB",
            Self::MappedBasicSoft(_) => "SBS",
            Self::MappedVariance(_) => "SV",
        }
    }

    /// Minimum light factor inside shadow
    pub const fn factor_minimum(&self) -> f32 {
        match self {
            Self::MappedBasic(s) => s.factor_minimum,
            Self::MappedBasicSoft(s) => s.basic.factor_minimum,
            Self::MappedVariance(s) => s.factor_minimum,
        }
    }

    /// Texel dimension of the shadow map
    pub const fn map_size(&self) -> u32 {
        match self {
            Self::MappedBasic(s) => s.map.size(),
            Self::MappedBasicSoft(s) => s.basic.map.size(),
            Self::MappedVariance(s) => s.map.size(),
        }
    }
}

impl From<ShadowMappedBasic> for Shadow {
    fn from(shadow: ShadowMappedBasic) -> Self {
        Self::MappedBasic(shadow)
    }
}

impl From<ShadowMappedBasicSoft> for Shadow {
    fn from(shadow: ShadowMappedBasicSoft) -> Self {
        Self::MappedBasicSoft(shadow)
    }
}

impl From<ShadowMappedVariance> for Shadow {
    fn from(shadow: ShadowMappedVariance) -> Self {
        Self::MappedVariance(shadow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_size_is_power_of_two() {
        let map = DepthMapDescription::new(
            10,
            DepthPrecision::Depth24,
            TextureFilterMinification::Linear,
            TextureFilterMagnification::Linear,
        )
        .unwrap();

        assert_eq!(map.size_exponent(), 10);
        assert_eq!(map.size(), 1024);
    }

    #[test]
    fn test_map_size_exponent_bounds() {
        for exponent in [0, SIZE_EXPONENT_MAX + 1] {
            let result = VarianceMapDescription::new(
                exponent,
                DepthVariancePrecision::Rg16F,
                TextureFilterMinification::Nearest,
                TextureFilterMagnification::Nearest,
            );
            assert!(matches!(
                result,
                Err(StructuralError::InvalidArgument { name: "size_exponent", .. })
            ));
        }

        let max = DepthMapDescription::new(
            SIZE_EXPONENT_MAX,
            DepthPrecision::Depth16,
            TextureFilterMinification::Nearest,
            TextureFilterMagnification::Nearest,
        )
        .unwrap();
        assert_eq!(max.size(), 65536);
    }

    #[test]
    fn test_map_from_defaults() {
        let defaults = ShadowDefaults {
            size_exponent: 9,
            ..ShadowDefaults::default()
        };

        let basic = DepthMapDescription::from_defaults(&defaults).unwrap();
        let variance = VarianceMapDescription::from_defaults(&defaults).unwrap();
        assert_eq!(basic.size(), 512);
        assert_eq!(basic.precision(), defaults.precision);
        assert_eq!(variance.precision(), defaults.variance_precision);
    }

    #[test]
    fn test_shadow_codes_are_distinct() {
        let basic = ShadowMappedBasicBuilder::new().build();
        let soft = ShadowMappedBasicSoftBuilder::new().build();
        let variance = ShadowMappedVarianceBuilder::new().build();

        let codes = [
            Shadow::from(basic).code(),
            Shadow::from(soft).code(),
            Shadow::from(variance).code(),
        ];
        assert_eq!(codes, ["SB", "SBS", "SV"]);
    }
}
