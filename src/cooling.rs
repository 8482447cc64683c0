use std::collections::HashMap;
use std::fmt;

use fixed_map::Key;
use tracing::debug;

use crate::error::Result;
use crate::inference::Engine;
use crate::inputs::Inputs;
use crate::membership::Triangle;
use crate::rules::Rules;
use crate::terms::Terms;
use crate::variable::{Variable, VariableKey, Variables};

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Temperature {
    Cold,
    Moderate,
    Hot,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Humidity {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Occupancy {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Cooling {
    Low,
    Medium,
    High,
}

crate::term_union! {
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum CoolingTerm {
        Temperature(Temperature),
        Humidity(Humidity),
        Occupancy(Occupancy),
        Cooling(Cooling),
    }
}

/// Sensor readings in degrees Celsius, percent relative humidity and people.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoolingInputs {
    pub temperature: f64,
    pub humidity: f64,
    pub occupancy: f64,
}

impl Default for CoolingInputs {
    fn default() -> Self {
        Self {
            temperature: 28.,
            humidity: 65.,
            occupancy: 5.,
        }
    }
}

/// How much air conditioning a cooling level calls for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Recommendation {
    Low,
    Medium,
    High,
}

impl Recommendation {
    pub fn from_level(level: f64) -> Self {
        if level < 30. {
            Self::Low
        } else if level < 60. {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low cooling - minimal air conditioning required.",
            Self::Medium => "Medium cooling - moderate air conditioning required.",
            Self::High => "High cooling - maximum air conditioning required.",
        })
    }
}

#[derive(Debug)]
pub struct CoolingReport {
    /// Inputs after clamping to their universes
    pub inputs: CoolingInputs,
    /// Cooling level on a 0 to 100 scale
    pub level: f64,
    pub recommendation: Recommendation,
    pub temperature: HashMap<Temperature, f64>,
    pub humidity: HashMap<Humidity, f64>,
    pub occupancy: HashMap<Occupancy, f64>,
    /// Aggregated output membership sampled over `cooling_universe`
    pub cooling_curve: Vec<f64>,
    pub cooling_universe: Vec<f64>,
}

/// The room cooling controller: three inputs, one output, five rules.
pub struct CoolingController {
    engine: Engine<CoolingTerm>,
    temperature: Variable<Temperature>,
    humidity: Variable<Humidity>,
    occupancy: Variable<Occupancy>,
    cooling: Variable<Cooling>,
}

impl CoolingController {
    pub fn new() -> Result<Self> {
        let mut temperature_terms = Terms::new();
        let mut humidity_terms = Terms::new();
        let mut occupancy_terms = Terms::new();
        let mut cooling_terms = Terms::new();

        temperature_terms.insert(Temperature::Cold, Triangle::new(15., 15., 20.)?);
        temperature_terms.insert(Temperature::Moderate, Triangle::new(18., 25., 28.)?);
        temperature_terms.insert(Temperature::Hot, Triangle::new(25., 35., 35.)?);
        humidity_terms.insert(Humidity::Low, Triangle::new(30., 30., 50.)?);
        humidity_terms.insert(Humidity::Medium, Triangle::new(40., 60., 60.)?);
        humidity_terms.insert(Humidity::High, Triangle::new(60., 80., 80.)?);
        occupancy_terms.insert(Occupancy::Low, Triangle::new(0., 0., 5.)?);
        occupancy_terms.insert(Occupancy::Medium, Triangle::new(3., 8., 12.)?);
        occupancy_terms.insert(Occupancy::High, Triangle::new(10., 20., 20.)?);
        cooling_terms.insert(Cooling::Low, Triangle::new(0., 0., 30.)?);
        cooling_terms.insert(Cooling::Medium, Triangle::new(20., 50., 60.)?);
        cooling_terms.insert(Cooling::High, Triangle::new(50., 100., 100.)?);

        let mut vars = Variables::new();
        let temperature = vars.add_antecedent("temperature", 15. ..=35., temperature_terms, Some(1.))?;
        let humidity = vars.add_antecedent("humidity", 30. ..=80., humidity_terms, Some(1.))?;
        let occupancy = vars.add_antecedent("occupancy", 0. ..=20., occupancy_terms, Some(1.))?;
        let cooling = vars.add_consequent("cooling", 0. ..=100., cooling_terms, Some(1.))?;
        let mut rules = Rules::with_capacity(5);

        rules.add(
            temperature.is(Temperature::Cold).or(humidity.is(Humidity::Low)),
            cooling.is(Cooling::Low),
        );
        rules.add(
            temperature
                .is(Temperature::Moderate)
                .and2(humidity.is(Humidity::Medium), occupancy.is(Occupancy::Low)),
            cooling.is(Cooling::Low),
        );
        rules.add(
            temperature
                .is(Temperature::Moderate)
                .and2(humidity.is(Humidity::Medium), occupancy.is(Occupancy::Medium)),
            cooling.is(Cooling::Medium),
        );
        rules.add(
            temperature.is(Temperature::Hot).or(humidity.is(Humidity::High)),
            cooling.is(Cooling::High),
        );
        rules.add(occupancy.is(Occupancy::High), cooling.is(Cooling::High));

        Ok(Self {
            engine: Engine::new(vars, rules)?,
            temperature,
            humidity,
            occupancy,
            cooling,
        })
    }

    pub fn engine(&self) -> &Engine<CoolingTerm> {
        &self.engine
    }

    pub fn temperature(&self) -> Variable<Temperature> {
        self.temperature
    }

    pub fn humidity(&self) -> Variable<Humidity> {
        self.humidity
    }

    pub fn occupancy(&self) -> Variable<Occupancy> {
        self.occupancy
    }

    pub fn cooling(&self) -> Variable<Cooling> {
        self.cooling
    }

    /// Clamps each reading into its universe, the way the dashboard sliders do.
    pub fn clamp(&self, inputs: CoolingInputs) -> CoolingInputs {
        let clamp = |key: VariableKey, x: f64| match self.engine.variables().variable(key) {
            Some(var) => var.universe().clamp(x),
            None => x,
        };

        CoolingInputs {
            temperature: clamp(self.temperature.key(), inputs.temperature),
            humidity: clamp(self.humidity.key(), inputs.humidity),
            occupancy: clamp(self.occupancy.key(), inputs.occupancy),
        }
    }

    pub fn compute(&self, inputs: CoolingInputs) -> Result<CoolingReport> {
        let inputs = self.clamp(inputs);
        let outputs = self.engine.eval(
            &Inputs::new()
                .with(self.temperature, inputs.temperature)
                .with(self.humidity, inputs.humidity)
                .with(self.occupancy, inputs.occupancy),
        )?;
        // eval succeeded, so every output variable has a crisp value
        let level = outputs.get_crisp(self.cooling).unwrap_or_default();
        let recommendation = Recommendation::from_level(level);

        debug!(?inputs, level, ?recommendation, "computed cooling level");

        Ok(CoolingReport {
            inputs,
            level,
            recommendation,
            temperature: narrow(outputs.get_memberships(self.temperature), |t| match t {
                CoolingTerm::Temperature(t) => Some(t),
                _ => None,
            }),
            humidity: narrow(outputs.get_memberships(self.humidity), |t| match t {
                CoolingTerm::Humidity(t) => Some(t),
                _ => None,
            }),
            occupancy: narrow(outputs.get_memberships(self.occupancy), |t| match t {
                CoolingTerm::Occupancy(t) => Some(t),
                _ => None,
            }),
            cooling_curve: outputs.get_aggregate(self.cooling).unwrap_or_default().to_vec(),
            cooling_universe: self
                .engine
                .variables()
                .variable(self.cooling.key())
                .map(|var| var.universe().points().to_vec())
                .unwrap_or_default(),
        })
    }
}

fn narrow<I: Eq + std::hash::Hash>(
    memberships: Option<&HashMap<CoolingTerm, f64>>,
    f: impl Fn(CoolingTerm) -> Option<I>,
) -> HashMap<I, f64> {
    memberships
        .into_iter()
        .flatten()
        .filter_map(|(term, degree)| f(*term).map(|t| (t, *degree)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_bands() {
        assert_eq!(Recommendation::from_level(0.), Recommendation::Low);
        assert_eq!(Recommendation::from_level(29.99), Recommendation::Low);
        assert_eq!(Recommendation::from_level(30.), Recommendation::Medium);
        assert_eq!(Recommendation::from_level(59.99), Recommendation::Medium);
        assert_eq!(Recommendation::from_level(60.), Recommendation::High);
        assert_eq!(
            Recommendation::High.to_string(),
            "High cooling - maximum air conditioning required."
        );
    }

    #[test]
    fn test_inputs_are_clamped_to_their_universes() {
        let controller = CoolingController::new().unwrap();
        let clamped = controller.clamp(CoolingInputs {
            temperature: 50.,
            humidity: 10.,
            occupancy: 7.,
        });

        assert_eq!(
            clamped,
            CoolingInputs {
                temperature: 35.,
                humidity: 30.,
                occupancy: 7.,
            }
        );
    }

    #[test]
    fn test_report_memberships() {
        let controller = CoolingController::new().unwrap();
        let report = controller.compute(CoolingInputs::default()).unwrap();

        assert_eq!(report.temperature[&Temperature::Hot], 0.3);
        assert_eq!(report.temperature[&Temperature::Moderate], 0.);
        assert_eq!(report.humidity[&Humidity::High], 0.25);
        assert_eq!(report.occupancy[&Occupancy::Medium], 0.4);
        assert_eq!(report.cooling_curve.len(), 101);
        assert_eq!(report.cooling_universe.len(), 101);
        assert_eq!(report.recommendation, Recommendation::High);
    }
}
