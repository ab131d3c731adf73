//! Definite integral of a user formula as a task: configuration, logging, computation and export.
//!
//! # Example
//! ```
//! use RustedGaussQuad::numerical::integral_task::IntegralTask;
//! use RustedGaussQuad::numerical::gauss_legendre::GaussOrder;
//! use simplelog::LevelFilter;
//! let mut task = IntegralTask::new("x^2 + 2x + 1", 0.0, 1.0)
//!     .with_order(GaussOrder::Three)
//!     .with_points(11)
//!     .with_loglevel(LevelFilter::Off);
//! let report = task.solve();
//! assert_eq!(report.display, "2.33333333");
//! assert_eq!(report.samples.len(), 11);
//! ```
//! The same task as a document:
//! ```text
//! integral
//!   function: "x^2 + 2x + 1"
//!   a: 0
//!   b: 1
//!   order: 3
//!   points: 11
//!   loglevel: off
//! ```
use crate::Utils::logger::{save_samples_to_csv, save_samples_to_file};
use crate::Utils::plots::plot_curve;
use crate::Utils::task_parser::{DocumentMap, SectionMap, Value, parse_document_as};
use crate::numerical::gauss_legendre::{
    ARGUMENT, DEFAULT_SAMPLE_POINTS, GaussOrder, MAX_SAMPLE_POINTS, QuadraturePoint,
    UnsupportedOrder, format_result, quadrature_points, sample_fn,
};
use crate::symbolic::normalize::normalize;
use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_errors::ExpressionEvaluationError;
use chrono::Local;
use log::{error, info, warn};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

/// shown instead of a number when the formula cannot be evaluated
pub const EXPRESSION_ERROR_MESSAGE: &str = "Error: check the expression!";
const SECTION: &str = "integral";
const KEYS: [&str; 11] = [
    "function", "a", "b", "order", "points", "plot", "csv", "txt", "output", "loglevel",
    "log_file",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read task file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed task document: {0}")]
    Document(String),
    #[error("key '{0}' is required in section 'integral'")]
    MissingKey(String),
    #[error("key '{key}' expects {expected}, found '{found}'")]
    WrongType {
        key: String,
        expected: &'static str,
        found: String,
    },
    #[error(transparent)]
    Order(#[from] UnsupportedOrder),
    #[error("loglevel must be off, none, debug, info, warn or error, found '{0}'")]
    LogLevel(String),
}

/// Outcome of one run. On failure `display` holds the generic message and there are no samples.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegralReport {
    pub value: Result<f64, ExpressionEvaluationError>,
    pub display: String,
    pub samples: Vec<(f64, f64)>,
}

impl IntegralReport {
    fn failed(err: ExpressionEvaluationError) -> Self {
        IntegralReport {
            value: Err(err),
            display: EXPRESSION_ERROR_MESSAGE.to_string(),
            samples: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntegralTask {
    /// formula in x as typed by the user
    pub function: String,
    pub a: f64,
    pub b: f64,
    pub order: GaussOrder,
    /// number of curve samples; None means no sampling unless an export needs it
    pub points: Option<usize>,
    pub plot: bool,
    pub csv: bool,
    pub txt: bool,
    /// base name of exported files
    pub output: String,
    pub loglevel: LevelFilter,
    pub log_to_file: bool,
    result: Option<IntegralReport>,
}

impl IntegralTask {
    pub fn new(function: &str, a: f64, b: f64) -> Self {
        IntegralTask {
            function: function.to_string(),
            a,
            b,
            order: GaussOrder::Two,
            points: None,
            plot: false,
            csv: false,
            txt: false,
            output: "integrand".to_string(),
            loglevel: LevelFilter::Info,
            log_to_file: false,
            result: None,
        }
    }

    pub fn with_order(mut self, order: GaussOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }

    pub fn with_csv(mut self, csv: bool) -> Self {
        self.csv = csv;
        self
    }

    pub fn with_txt(mut self, txt: bool) -> Self {
        self.txt = txt;
        self
    }

    pub fn with_output(mut self, output: &str) -> Self {
        self.output = output.to_string();
        self
    }

    pub fn with_loglevel(mut self, loglevel: LevelFilter) -> Self {
        self.loglevel = loglevel;
        self
    }

    pub fn with_log_file(mut self, log_to_file: bool) -> Self {
        self.log_to_file = log_to_file;
        self
    }

    /// Reads a task document from disk, see the module docs for the format.
    pub fn from_task_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    fn template() -> DocumentMap {
        let section: SectionMap = KEYS.iter().map(|key| (key.to_string(), None)).collect();
        HashMap::from([(SECTION.to_string(), section)])
    }

    /// Fills the task from an already parsed document.
    pub fn set_params_from_hashmap(document: DocumentMap) -> Result<Self, ConfigError> {
        let section = document
            .get(SECTION)
            .ok_or_else(|| ConfigError::MissingKey("function".to_string()))?;
        let function = first(section, "function")
            .ok_or_else(|| ConfigError::MissingKey("function".to_string()))?
            .to_string_value();
        let a = required_float(section, "a")?;
        let b = required_float(section, "b")?;
        let mut task = IntegralTask::new(&function, a, b);

        if let Some(value) = first(section, "order") {
            task.order = GaussOrder::try_from(as_count(value, "order")?)?;
        }
        if let Some(value) = first(section, "points") {
            let points = as_count(value, "points")?;
            if points > MAX_SAMPLE_POINTS {
                return Err(wrong_type("points", "at most 1000000 samples", value));
            }
            task.points = Some(points);
        }
        task.plot = optional_bool(section, "plot")?.unwrap_or(false);
        task.csv = optional_bool(section, "csv")?.unwrap_or(false);
        task.txt = optional_bool(section, "txt")?.unwrap_or(false);
        task.log_to_file = optional_bool(section, "log_file")?.unwrap_or(false);
        if let Some(value) = first(section, "output") {
            task.output = value.to_string_value();
        }
        if let Some(value) = first(section, "loglevel") {
            task.loglevel = parse_loglevel(&value.to_string_value())?;
        }
        Ok(task)
    }

    pub fn get_result(&self) -> Option<&IntegralReport> {
        self.result.as_ref()
    }

    // wrapper around solver function to implement logging
    pub fn solve(&mut self) -> IntegralReport {
        if self.loglevel == LevelFilter::Off {
            return self.solver();
        }
        let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
            self.loglevel,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )];
        let mut log_file_problem = None;
        if self.log_to_file {
            let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
            let name = format!("log_{}.txt", date_and_time);
            match File::create(&name) {
                Ok(file) => loggers.push(WriteLogger::new(self.loglevel, Config::default(), file)),
                Err(e) => log_file_problem = Some(format!("cannot create {}: {}", name, e)),
            }
        }
        match CombinedLogger::init(loggers) {
            Ok(()) => {
                if let Some(problem) = log_file_problem {
                    warn!("{}", problem);
                }
                let report = self.solver();
                info!("\n \n Program ended");
                report
            }
            // a logger is already installed
            Err(_) => self.solver(),
        }
    }

    /// Normalizes and compiles the formula, integrates it, samples the curve and
    /// writes the requested exports.
    pub fn solver(&mut self) -> IntegralReport {
        let normalized = normalize(&self.function);
        info!(
            "integrating f(x) = {} on [{}, {}] with the {} rule",
            normalized, self.a, self.b, self.order
        );
        let compiled =
            parse_expression_func(&normalized).and_then(|expr| expr.lambdify1D(ARGUMENT));
        let f = match compiled {
            Ok(f) => f,
            Err(e) => {
                error!("cannot evaluate '{}': {}", self.function, e);
                let report = IntegralReport::failed(e);
                self.result = Some(report.clone());
                return report;
            }
        };

        let nodes = quadrature_points(&f, self.a, self.b, self.order);
        info!("{}", node_table(&nodes));
        let half = (self.b - self.a) / 2.0;
        let value = half * nodes.iter().fold(0.0, |acc, p| acc + p.weight * p.fx);
        if !value.is_finite() {
            warn!("the integral is not finite: {}", value);
        }

        let wants_samples = self.plot || self.csv || self.txt;
        let samples = match self.points {
            Some(n) => sample_fn(&f, self.a, self.b, n),
            None if wants_samples => sample_fn(&f, self.a, self.b, DEFAULT_SAMPLE_POINTS),
            None => Vec::new(),
        };
        self.export(&samples);

        let report = IntegralReport {
            value: Ok(value),
            display: format_result(value),
            samples,
        };
        info!("∫ f(x) dx = {}", report.display);
        self.result = Some(report.clone());
        report
    }

    /// export failures are logged, the computed value is kept
    fn export(&self, samples: &[(f64, f64)]) {
        let header = format!("f(x) = {}", self.function);
        if self.plot {
            match plot_curve(samples, ARGUMENT, &header, &self.output) {
                Ok(()) => info!("plot saved to {}.png", self.output),
                Err(e) => error!("{}", e),
            }
        }
        if self.csv {
            let name = format!("{}.csv", self.output);
            match save_samples_to_csv(samples, ARGUMENT, &header, &name) {
                Ok(()) => info!("samples saved to {}", name),
                Err(e) => error!("{}", e),
            }
        }
        if self.txt {
            let name = format!("{}.txt", self.output);
            match save_samples_to_file(samples, ARGUMENT, &header, &name) {
                Ok(()) => info!("samples saved to {}", name),
                Err(e) => error!("{}", e),
            }
        }
    }
}

impl FromStr for IntegralTask {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let document =
            parse_document_as(input, Some(&Self::template())).map_err(ConfigError::Document)?;
        Self::set_params_from_hashmap(document)
    }
}

pub fn parse_loglevel(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.to_lowercase().as_str() {
        "off" | "none" => Ok(LevelFilter::Off),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        _ => Err(ConfigError::LogLevel(level.to_string())),
    }
}

fn node_table(points: &[QuadraturePoint]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["node", "t", "x", "weight", "f(x)"].map(String::from));
    for (i, point) in points.iter().enumerate() {
        builder.push_record([
            i.to_string(),
            format!("{:.16}", point.reference),
            format!("{:.10}", point.x),
            format!("{:.16}", point.weight),
            format!("{:.10}", point.fx),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

fn first<'a>(section: &'a SectionMap, key: &str) -> Option<&'a Value> {
    section
        .get(key)
        .and_then(|values| values.as_ref())
        .and_then(|values| values.first())
}

fn wrong_type(key: &str, expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::WrongType {
        key: key.to_string(),
        expected,
        found: value.to_string_value(),
    }
}

fn required_float(section: &SectionMap, key: &str) -> Result<f64, ConfigError> {
    let value = first(section, key).ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
    value.as_float().ok_or_else(|| wrong_type(key, "a number", value))
}

fn optional_bool(section: &SectionMap, key: &str) -> Result<Option<bool>, ConfigError> {
    first(section, key)
        .map(|value| value.as_boolean().ok_or_else(|| wrong_type(key, "true or false", value)))
        .transpose()
}

fn as_count(value: &Value, key: &str) -> Result<usize, ConfigError> {
    value
        .as_integer()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| wrong_type(key, "a non-negative integer", value))
}
