//! Shadow builders
//!
//! Setters validate eagerly; `build` never fails and may be called any
//! number of times.

use super::{
    DepthMapDescription, ShadowMapDescription, ShadowMappedBasic, ShadowMappedBasicSoft,
    ShadowMappedVariance, VarianceMapDescription,
};
use crate::core::config::ShadowDefaults;
use crate::error::{StructuralError, StructuralResult};
use crate::foundation::math::utils;
use crate::graphics::{
    DepthPrecision, DepthVariancePrecision, TextureFilterMagnification, TextureFilterMinification,
};

const DEFAULT_SIZE_EXPONENT: u32 = 10;

fn default_depth_map() -> DepthMapDescription {
    ShadowMapDescription {
        size_exponent: DEFAULT_SIZE_EXPONENT,
        precision: DepthPrecision::Depth24,
        filter_minification: TextureFilterMinification::Linear,
        filter_magnification: TextureFilterMagnification::Linear,
    }
}

fn default_variance_map() -> VarianceMapDescription {
    ShadowMapDescription {
        size_exponent: DEFAULT_SIZE_EXPONENT,
        precision: DepthVariancePrecision::Rg32F,
        filter_minification: TextureFilterMinification::Linear,
        filter_magnification: TextureFilterMagnification::Linear,
    }
}

fn check_factor_minimum(factor: f32) -> StructuralResult<f32> {
    if utils::is_unit_interval(factor) {
        Ok(factor)
    } else {
        Err(StructuralError::invalid(
            "factor_minimum",
            format!("{factor} outside [0, 1]"),
        ))
    }
}

/// Builder for [`ShadowMappedBasic`]
#[derive(Debug, Clone)]
pub struct ShadowMappedBasicBuilder {
    map: DepthMapDescription,
    depth_bias: f32,
    factor_minimum: f32,
}

impl ShadowMappedBasicBuilder {
    /// Create a builder with a 1024x1024 24-bit map and no bias
    pub fn new() -> Self {
        Self {
            map: default_depth_map(),
            depth_bias: 0.0,
            factor_minimum: 0.0,
        }
    }

    /// Create a builder from configured defaults
    pub fn from_defaults(defaults: &ShadowDefaults) -> StructuralResult<Self> {
        Ok(Self {
            map: DepthMapDescription::from_defaults(defaults)?,
            depth_bias: 0.0,
            factor_minimum: check_factor_minimum(defaults.factor_minimum)?,
        })
    }

    /// Seed a builder from an existing shadow
    pub fn from_existing(shadow: &ShadowMappedBasic) -> Self {
        Self {
            map: shadow.map,
            depth_bias: shadow.depth_bias,
            factor_minimum: shadow.factor_minimum,
        }
    }

    /// Set the shadow map description
    pub fn set_map(&mut self, map: DepthMapDescription) -> &mut Self {
        self.map = map;
        self
    }

    /// Set the depth bias
    pub fn set_depth_bias(&mut self, bias: f32) -> StructuralResult<&mut Self> {
        if !bias.is_finite() {
            return Err(StructuralError::invalid("depth_bias", "must be finite"));
        }
        self.depth_bias = bias;
        Ok(self)
    }

    /// Set the minimum light factor; values outside `[0, 1]` are rejected
    pub fn set_factor_minimum(&mut self, factor: f32) -> StructuralResult<&mut Self> {
        self.factor_minimum = check_factor_minimum(factor)?;
        Ok(self)
    }

    /// Freeze the current state
    pub fn build(&self) -> ShadowMappedBasic {
        ShadowMappedBasic {
            map: self.map,
            depth_bias: self.depth_bias,
            factor_minimum: self.factor_minimum,
        }
    }
}

impl Default for ShadowMappedBasicBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ShadowMappedBasicSoft`]
#[derive(Debug, Clone)]
pub struct ShadowMappedBasicSoftBuilder {
    basic: ShadowMappedBasicBuilder,
    blur_radius: f32,
    blur_passes: u32,
}

impl ShadowMappedBasicSoftBuilder {
    /// Create a builder with a single one-texel blur pass
    pub fn new() -> Self {
        Self {
            basic: ShadowMappedBasicBuilder::new(),
            blur_radius: 1.0,
            blur_passes: 1,
        }
    }

    /// Create a builder from configured defaults
    pub fn from_defaults(defaults: &ShadowDefaults) -> StructuralResult<Self> {
        Ok(Self {
            basic: ShadowMappedBasicBuilder::from_defaults(defaults)?,
            ..Self::new()
        })
    }

    /// Seed a builder from an existing shadow
    pub fn from_existing(shadow: &ShadowMappedBasicSoft) -> Self {
        Self {
            basic: ShadowMappedBasicBuilder::from_existing(&shadow.basic),
            blur_radius: shadow.blur_radius,
            blur_passes: shadow.blur_passes,
        }
    }

    /// Set the shadow map description
    pub fn set_map(&mut self, map: DepthMapDescription) -> &mut Self {
        self.basic.set_map(map);
        self
    }

    /// Set the depth bias
    pub fn set_depth_bias(&mut self, bias: f32) -> StructuralResult<&mut Self> {
        self.basic.set_depth_bias(bias)?;
        Ok(self)
    }

    /// Set the minimum light factor; values outside `[0, 1]` are rejected
    pub fn set_factor_minimum(&mut self, factor: f32) -> StructuralResult<&mut Self> {
        self.basic.set_factor_minimum(factor)?;
        Ok(self)
    }

    /// Set the blur radius in screen texels
    pub fn set_blur_radius(&mut self, radius: f32) -> StructuralResult<&mut Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(StructuralError::invalid(
                "blur_radius",
                format!("{radius} must be finite and non-negative"),
            ));
        }
        self.blur_radius = radius;
        Ok(self)
    }

    /// Set the number of blur passes
    pub fn set_blur_passes(&mut self, passes: u32) -> StructuralResult<&mut Self> {
        if passes == 0 {
            return Err(StructuralError::invalid("blur_passes", "at least one pass is required"));
        }
        self.blur_passes = passes;
        Ok(self)
    }

    /// Freeze the current state
    pub fn build(&self) -> ShadowMappedBasicSoft {
        ShadowMappedBasicSoft {
            basic: self.basic.build(),
            blur_radius: self.blur_radius,
            blur_passes: self.blur_passes,
        }
    }
}

impl Default for ShadowMappedBasicSoftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ShadowMappedVariance`]
#[derive(Debug, Clone)]
pub struct ShadowMappedVarianceBuilder {
    map: VarianceMapDescription,
    factor_minimum: f32,
    minimum_variance: f32,
    light_bleed_reduction: f32,
}

impl ShadowMappedVarianceBuilder {
    /// Create a builder with a 1024x1024 32-bit moment map
    pub fn new() -> Self {
        Self {
            map: default_variance_map(),
            factor_minimum: 0.0,
            minimum_variance: 0.000_01,
            light_bleed_reduction: 0.2,
        }
    }

    /// Create a builder from configured defaults
    pub fn from_defaults(defaults: &ShadowDefaults) -> StructuralResult<Self> {
        Ok(Self {
            map: VarianceMapDescription::from_defaults(defaults)?,
            factor_minimum: check_factor_minimum(defaults.factor_minimum)?,
            ..Self::new()
        })
    }

    /// Seed a builder from an existing shadow
    pub fn from_existing(shadow: &ShadowMappedVariance) -> Self {
        Self {
            map: shadow.map,
            factor_minimum: shadow.factor_minimum,
            minimum_variance: shadow.minimum_variance,
            light_bleed_reduction: shadow.light_bleed_reduction,
        }
    }

    /// Set the shadow map description
    pub fn set_map(&mut self, map: VarianceMapDescription) -> &mut Self {
        self.map = map;
        self
    }

    /// Set the minimum light factor; values outside `[0, 1]` are rejected
    pub fn set_factor_minimum(&mut self, factor: f32) -> StructuralResult<&mut Self> {
        self.factor_minimum = check_factor_minimum(factor)?;
        Ok(self)
    }

    /// Set the minimum variance; must be strictly positive
    pub fn set_minimum_variance(&mut self, variance: f32) -> StructuralResult<&mut Self> {
        if !utils::is_positive(variance) {
            return Err(StructuralError::invalid(
                "minimum_variance",
                format!("{variance} must be finite and positive"),
            ));
        }
        self.minimum_variance = variance;
        Ok(self)
    }

    /// Set the light bleed reduction in `[0, 1)`
    pub fn set_light_bleed_reduction(&mut self, amount: f32) -> StructuralResult<&mut Self> {
        if !amount.is_finite() || !(0.0..1.0).contains(&amount) {
            return Err(StructuralError::invalid(
                "light_bleed_reduction",
                format!("{amount} outside [0, 1)"),
            ));
        }
        self.light_bleed_reduction = amount;
        Ok(self)
    }

    /// Freeze the current state
    pub fn build(&self) -> ShadowMappedVariance {
        ShadowMappedVariance {
            map: self.map,
            factor_minimum: self.factor_minimum,
            minimum_variance: self.minimum_variance,
            light_bleed_reduction: self.light_bleed_reduction,
        }
    }
}

impl Default for ShadowMappedVarianceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
