//! Print settings: printer, slicing and pricing parameters.
//!
//! A [`PrintSettings`] value is a snapshot of the shop's admin settings. It is
//! validated once at the boundary and then read for the whole analysis.

use mesh_types::Extents;

use crate::{CostError, CostResult};

/// Printer, slicing and pricing parameters for a quote.
///
/// Field names serialize in camelCase so the settings document kept by the
/// storefront deserializes directly. Every field is required.
///
/// # Example
///
/// ```
/// use print_cost::PrintSettings;
///
/// let settings = PrintSettings::default()
///     .with_infill(40.0)
///     .with_minimum_charge(15.0);
/// assert!(settings.validate().is_ok());
/// assert_eq!(settings.printer_model, "Bambu Labs X1C");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PrintSettings {
    /// Display name of the printer.
    pub printer_model: String,

    /// Build volume (X, Y, Z) in mm.
    pub build_volume: Extents,

    /// Layer height in mm.
    pub default_layer_height: f64,

    /// Infill percentage, 0 to 100.
    pub default_infill: f64,

    /// Print speed in mm/s.
    pub print_speed: f64,

    /// Material density in g/cm³.
    pub material_density: f64,

    /// Flat fee added to every order.
    pub base_order_fee: f64,

    /// Material price per gram.
    pub price_per_gram: f64,

    /// Machine time price per hour.
    pub hourly_machine_rate: f64,

    /// Lowest total ever charged.
    pub minimum_charge: f64,

    /// Refuse to price models that do not fit the build volume.
    pub reject_oversized_files: bool,

    /// Largest accepted upload in megabytes.
    #[cfg_attr(feature = "serde", serde(rename = "maxFileSize"))]
    pub max_file_size_mb: f64,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self::bambu_x1c()
    }
}

impl PrintSettings {
    /// Bytes per megabyte for [`max_file_size_bytes`](Self::max_file_size_bytes).
    const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

    /// Bambu Lab X1 Carbon with PLA at the shop's standard rates.
    #[must_use]
    pub fn bambu_x1c() -> Self {
        Self {
            printer_model: "Bambu Labs X1C".to_string(),
            build_volume: Extents::cube(256.0),
            default_layer_height: 0.2,
            default_infill: 20.0,
            print_speed: 150.0,
            material_density: 1.24,
            base_order_fee: 5.0,
            price_per_gram: 0.03,
            hourly_machine_rate: 8.0,
            minimum_charge: 10.0,
            reject_oversized_files: true,
            max_file_size_mb: 100.0,
        }
    }

    /// Prusa MK4 with PLA at the shop's standard rates.
    ///
    /// Smaller bed and slower default speed than [`bambu_x1c`](Self::bambu_x1c).
    #[must_use]
    pub fn prusa_mk4() -> Self {
        Self {
            printer_model: "Prusa MK4".to_string(),
            build_volume: Extents::new(250.0, 210.0, 220.0),
            print_speed: 100.0,
            ..Self::bambu_x1c()
        }
    }

    /// Use a different build volume.
    #[must_use]
    pub fn with_build_volume(mut self, x: f64, y: f64, z: f64) -> Self {
        self.build_volume = Extents::new(x, y, z);
        self
    }

    /// Use a different layer height.
    #[must_use]
    pub fn with_layer_height(mut self, layer_height: f64) -> Self {
        self.default_layer_height = layer_height;
        self
    }

    /// Use a different infill percentage.
    #[must_use]
    pub fn with_infill(mut self, infill: f64) -> Self {
        self.default_infill = infill;
        self
    }

    /// Use a different print speed.
    #[must_use]
    pub fn with_print_speed(mut self, speed: f64) -> Self {
        self.print_speed = speed;
        self
    }

    /// Use a different material density.
    #[must_use]
    pub fn with_material_density(mut self, density: f64) -> Self {
        self.material_density = density;
        self
    }

    /// Use different prices.
    #[must_use]
    pub fn with_pricing(
        mut self,
        base_order_fee: f64,
        price_per_gram: f64,
        hourly_machine_rate: f64,
    ) -> Self {
        self.base_order_fee = base_order_fee;
        self.price_per_gram = price_per_gram;
        self.hourly_machine_rate = hourly_machine_rate;
        self
    }

    /// Use a different minimum charge.
    #[must_use]
    pub fn with_minimum_charge(mut self, minimum_charge: f64) -> Self {
        self.minimum_charge = minimum_charge;
        self
    }

    /// Choose whether oversized models are refused.
    #[must_use]
    pub fn with_reject_oversized(mut self, reject: bool) -> Self {
        self.reject_oversized_files = reject;
        self
    }

    /// Use a different upload size limit.
    #[must_use]
    pub fn with_max_file_size_mb(mut self, megabytes: f64) -> Self {
        self.max_file_size_mb = megabytes;
        self
    }

    /// Upload size limit in bytes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_file_size_bytes(&self) -> u64 {
        // Saturating float-to-int cast; validated settings are positive
        (self.max_file_size_mb * Self::BYTES_PER_MB) as u64
    }

    /// Check every field against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::InvalidSettings`] naming the first offending
    /// field: any non-finite number; layer height, print speed, density,
    /// build volume axes or file size limit `<= 0`; infill outside
    /// `[0, 100]`; a negative price or minimum charge.
    pub fn validate(&self) -> CostResult<()> {
        check_time_params(
            self.default_layer_height,
            self.print_speed,
            self.default_infill,
        )?;
        positive("build_volume.x", self.build_volume.x)?;
        positive("build_volume.y", self.build_volume.y)?;
        positive("build_volume.z", self.build_volume.z)?;
        positive("max_file_size_mb", self.max_file_size_mb)?;
        self.check_pricing()
    }

    /// Check the fields used by the cost calculation.
    pub(crate) fn check_pricing(&self) -> CostResult<()> {
        positive("material_density", self.material_density)?;
        non_negative("base_order_fee", self.base_order_fee)?;
        non_negative("price_per_gram", self.price_per_gram)?;
        non_negative("hourly_machine_rate", self.hourly_machine_rate)?;
        non_negative("minimum_charge", self.minimum_charge)
    }
}

fn finite(field: &'static str, value: f64) -> CostResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CostError::invalid_settings(
            field,
            format!("must be finite, got {value}"),
        ))
    }
}

fn positive(field: &'static str, value: f64) -> CostResult<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CostError::invalid_settings(
            field,
            format!("must be > 0, got {value}"),
        ))
    }
}

fn non_negative(field: &'static str, value: f64) -> CostResult<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CostError::invalid_settings(
            field,
            format!("must be >= 0, got {value}"),
        ))
    }
}

fn percent(field: &'static str, value: f64) -> CostResult<()> {
    finite(field, value)?;
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(CostError::invalid_settings(
            field,
            format!("must be within 0..=100, got {value}"),
        ))
    }
}

/// Check the three parameters of the print-time heuristic.
pub(crate) fn check_time_params(
    layer_height_mm: f64,
    print_speed_mm_s: f64,
    infill_percent: f64,
) -> CostResult<()> {
    positive("default_layer_height", layer_height_mm)?;
    positive("print_speed", print_speed_mm_s)?;
    percent("default_infill", infill_percent)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shop_settings() {
        let s = PrintSettings::default();
        assert_eq!(s.build_volume, Extents::cube(256.0));
        assert!((s.default_layer_height - 0.2).abs() < f64::EPSILON);
        assert!((s.default_infill - 20.0).abs() < f64::EPSILON);
        assert!((s.print_speed - 150.0).abs() < f64::EPSILON);
        assert!((s.material_density - 1.24).abs() < f64::EPSILON);
        assert!((s.base_order_fee - 5.0).abs() < f64::EPSILON);
        assert!((s.price_per_gram - 0.03).abs() < f64::EPSILON);
        assert!((s.hourly_machine_rate - 8.0).abs() < f64::EPSILON);
        assert!((s.minimum_charge - 10.0).abs() < f64::EPSILON);
        assert!(s.reject_oversized_files);
        assert_eq!(s.max_file_size_bytes(), 100 * 1024 * 1024);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn presets_validate() {
        assert!(PrintSettings::prusa_mk4().validate().is_ok());
        assert_eq!(PrintSettings::prusa_mk4().build_volume.y, 210.0);
    }

    #[test]
    fn rejects_non_positive_physical_values() {
        let err = PrintSettings::default().with_layer_height(0.0).validate().unwrap_err();
        assert_eq!(err.field(), "default_layer_height");

        let err = PrintSettings::default().with_print_speed(-5.0).validate().unwrap_err();
        assert_eq!(err.field(), "print_speed");

        let err = PrintSettings::default()
            .with_material_density(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "material_density");

        let err = PrintSettings::default()
            .with_build_volume(256.0, 0.0, 256.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "build_volume.y");

        let err = PrintSettings::default()
            .with_max_file_size_mb(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "max_file_size_mb");
    }

    #[test]
    fn rejects_infill_out_of_range() {
        assert!(PrintSettings::default().with_infill(0.0).validate().is_ok());
        assert!(PrintSettings::default().with_infill(100.0).validate().is_ok());

        let err = PrintSettings::default().with_infill(100.5).validate().unwrap_err();
        assert_eq!(err.field(), "default_infill");
        assert!(PrintSettings::default().with_infill(-1.0).validate().is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = PrintSettings::default()
            .with_print_speed(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CostError::InvalidSettings { field: "print_speed", .. }));

        let err = PrintSettings::default()
            .with_pricing(5.0, f64::INFINITY, 8.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "price_per_gram");
    }

    #[test]
    fn money_may_be_zero_not_negative() {
        assert!(PrintSettings::default().with_pricing(0.0, 0.0, 0.0).with_minimum_charge(0.0).validate().is_ok());

        let err = PrintSettings::default().with_minimum_charge(-1.0).validate().unwrap_err();
        assert_eq!(err.field(), "minimum_charge");
        let err = PrintSettings::default().with_pricing(-5.0, 0.03, 8.0).validate().unwrap_err();
        assert_eq!(err.field(), "base_order_fee");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_camel_case_document() {
        let json = r#"{
            "printerModel": "Bambu Labs X1C",
            "buildVolume": { "x": 256, "y": 256, "z": 256 },
            "defaultLayerHeight": 0.2,
            "defaultInfill": 20,
            "printSpeed": 150,
            "materialDensity": 1.24,
            "baseOrderFee": 5,
            "pricePerGram": 0.03,
            "hourlyMachineRate": 8,
            "minimumCharge": 10,
            "enableAutomaticAnalysis": true,
            "rejectOversizedFiles": true,
            "maxFileSize": 100
        }"#;
        let parsed: PrintSettings = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, PrintSettings::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{ "printerModel": "X" }"#;
        assert!(serde_json::from_str::<PrintSettings>(json).is_err());
    }
}
