//! Thermodynamic response functions from equilibrium fluctuations of an
//! isothermal-isobaric run.

use lmp_core::error::{LmpError, LmpResult};
use lmp_core::stats::{covariance, mean, sample_variance};
use lmp_core::table::ThermoTable;

/// Conversion factors from simulation units to SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSystem {
    /// Pressure unit in Pa.
    pub pressure: f64,
    /// Energy unit in J per molecule.
    pub energy: f64,
    /// Volume unit in m^3.
    pub volume: f64,
    pub boltzmann: f64,
    pub avogadro: f64,
}

impl UnitSystem {
    pub const AVOGADRO: f64 = 6.022_140_76e23;

    /// LAMMPS `real` units: atm, kcal/mol and cubic Angstrom.
    pub fn real() -> Self {
        Self {
            pressure: 101_325.0,
            energy: 4184.0 / Self::AVOGADRO,
            volume: 1e-30,
            boltzmann: 1.380_648_52e-23,
            avogadro: Self::AVOGADRO,
        }
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::real()
    }
}

/// Averages and response functions, all in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoSummary {
    /// K
    pub temperature: f64,
    /// Pa
    pub pressure: f64,
    /// m^3/mol
    pub volume: f64,
    /// J per system
    pub enthalpy: f64,
    /// J/mol/K
    pub c_p: f64,
    /// 1/Pa
    pub kappa_t: f64,
    /// 1/K
    pub alpha_p: f64,
}

impl ThermoSummary {
    pub const CSV_HEADER: [&'static str; 7] = [
        "Temperature",
        "Pressure",
        "Volume",
        "Enthalpy",
        "c_p",
        "kappa_T",
        "alpha_p",
    ];

    /// Values in `CSV_HEADER` order.
    pub fn values(&self) -> [f64; 7] {
        [
            self.temperature,
            self.pressure,
            self.volume,
            self.enthalpy,
            self.c_p,
            self.kappa_t,
            self.alpha_p,
        ]
    }

    /// Isothermal bulk modulus in Pa.
    pub fn bulk_modulus(&self) -> f64 {
        1.0 / self.kappa_t
    }
}

/// Computes `c_p`, `kappa_T` and `alpha_p` from a table holding `Temp`,
/// `Press`, `PotEng`, `KinEng` and `Volume`.
///
/// The enthalpy series is `(PotEng + KinEng) + <P> V` with the mean pressure,
/// which keeps the pressure noise of a barostat out of the fluctuations.
pub fn fluctuation_properties(
    table: &ThermoTable,
    n_molecules: usize,
    units: &UnitSystem,
) -> LmpResult<ThermoSummary> {
    if n_molecules == 0 {
        return Err(LmpError::Invalid("number of molecules must be positive".into()));
    }
    let temp = table.column("Temp")?;
    let press = table.column("Press")?;
    let pot = table.column("PotEng")?;
    let kin = table.column("KinEng")?;
    let vol = table.column("Volume")?;
    if table.n_rows() < 2 {
        return Err(LmpError::InsufficientData(format!(
            "fluctuation analysis needs at least 2 thermo rows, got {}",
            table.n_rows()
        )));
    }

    let temperature = mean(&temp)?;
    if !(temperature > 0.0) {
        return Err(LmpError::Invalid(format!(
            "mean temperature must be positive, got {temperature}"
        )));
    }
    let pressure = mean(&press)? * units.pressure;
    let volume_si: Vec<f64> = vol.iter().map(|v| v * units.volume).collect();
    let mean_volume = mean(&volume_si)?;
    if !(mean_volume > 0.0) {
        return Err(LmpError::Invalid(format!(
            "mean volume must be positive, got {mean_volume}"
        )));
    }
    let enthalpy: Vec<f64> = pot
        .iter()
        .zip(&kin)
        .zip(&volume_si)
        .map(|((u, k), v)| (u + k) * units.energy + pressure * v)
        .collect();

    let k_b = units.boltzmann;
    let kt2 = k_b * temperature * temperature;
    let c_p = sample_variance(&enthalpy)? / kt2 / n_molecules as f64 * units.avogadro;
    let kappa_t = sample_variance(&volume_si)? / (k_b * temperature * mean_volume);
    let alpha_p = covariance(&volume_si, &enthalpy)? / (kt2 * mean_volume);
    log::debug!("fluctuation analysis over {} rows at T = {temperature:.1} K", table.n_rows());

    Ok(ThermoSummary {
        temperature,
        pressure,
        volume: mean_volume * units.avogadro / n_molecules as f64,
        enthalpy: mean(&enthalpy)?,
        c_p,
        kappa_t,
        alpha_p,
    })
}
