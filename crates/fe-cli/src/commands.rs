//! Subcommand implementations

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use tracing::{debug, info};

use fe_core::{format_percentage, human_readable_magnitude, CalculatorConfig, Dataset, ScenarioDataset};
use fe_models::{
    CalculatorSession, ComparisonRow, EmissionModel, PopulationInputs, PredictionView,
    ScenarioSession, StandardizedRegression,
};

/// Everything a subcommand needs besides its own arguments
pub struct Context {
    config: CalculatorConfig,
    dataset: Option<PathBuf>,
    json: bool,
}

impl Context {
    pub fn load(config: Option<&Path>, dataset: Option<PathBuf>, json: bool) -> Result<Self> {
        let config = match config {
            Some(path) => CalculatorConfig::from_path(path)?,
            None => CalculatorConfig::default(),
        };
        let dataset = dataset.or_else(|| config.dataset_path.clone());
        Ok(Self {
            config,
            dataset,
            json,
        })
    }

    fn dataset_path(&self) -> Result<&Path> {
        match &self.dataset {
            Some(path) => Ok(path),
            None => bail!("no dataset given; pass --dataset or set dataset_path in the config"),
        }
    }

    fn load_dataset(&self) -> Result<Dataset> {
        let path = self.dataset_path()?;
        let dataset = Dataset::from_path(path)
            .with_context(|| format!("failed to load dataset {}", path.display()))?;
        info!(path = %path.display(), countries = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    fn load_scenario_dataset(&self) -> Result<ScenarioDataset> {
        let path = self.dataset_path()?;
        let dataset = ScenarioDataset::from_path(path)
            .with_context(|| format!("failed to load scenario dataset {}", path.display()))?;
        info!(path = %path.display(), countries = dataset.len(), "loaded scenario dataset");
        Ok(dataset)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ==================== countries ====================

pub fn countries(ctx: &Context, scenario: bool) -> Result<()> {
    let names: Vec<String> = if scenario || ctx.config.scenario {
        let dataset = ctx.load_scenario_dataset()?;
        dataset.countries().map(str::to_string).collect()
    } else {
        let dataset = ctx.load_dataset()?;
        dataset.countries().map(str::to_string).collect()
    };

    if ctx.json {
        return print_json(&names);
    }
    for name in &names {
        println!("{name}");
    }
    Ok(())
}

// ==================== predict ====================

pub struct PredictArgs {
    pub country: String,
    pub year: Option<String>,
    pub population: Option<u64>,
    pub urban: Option<f64>,
}

/// Inputs and result of one prediction
#[derive(Debug, Serialize)]
pub struct PredictReport {
    country: String,
    year: Option<i32>,
    total_population: Option<f64>,
    urban_percent: f64,
    urban_population: f64,
    rural_population: f64,
    #[serde(flatten)]
    prediction: PredictionView,
}

pub fn predict_report(ctx: &Context, args: &PredictArgs) -> Result<PredictReport> {
    if ctx.config.scenario {
        bail!("predict needs a per-country dataset; use compare for scenario datasets");
    }

    let dataset = ctx.load_dataset()?;
    let mut session = CalculatorSession::with_config(&dataset, &ctx.config);
    session.select_country(&args.country)?;

    if let Some(year) = &args.year {
        session.set_year(year.as_str());
    }
    apply_inputs(session.inputs_mut(), args.population, args.urban);
    debug!(features = ?session.features(), "prediction inputs");

    let Some(prediction) = session.prediction() else {
        bail!(
            "cannot predict for {}: year {:?} must be a number",
            args.country,
            session.year_input()
        );
    };

    Ok(PredictReport {
        country: args.country.clone(),
        year: session.year(),
        total_population: session.total_population(),
        urban_percent: session.urban_percentage(),
        urban_population: session.urban_population(),
        rural_population: session.rural_population(),
        prediction,
    })
}

pub fn predict(ctx: &Context, args: &PredictArgs) -> Result<()> {
    let report = predict_report(ctx, args)?;
    if ctx.json {
        return print_json(&report);
    }

    println!("Country:          {}", report.country);
    if let Some(year) = report.year {
        println!("Year:             {year}");
    }
    println!(
        "Urban population: {}",
        human_readable_magnitude(report.urban_population)
    );
    println!(
        "Rural population: {}",
        human_readable_magnitude(report.rural_population)
    );
    println!(
        "Emissions:        {} kgCO2eq",
        report.prediction.formatted_value()
    );
    println!("MAPE:             {}", report.prediction.formatted_mape());
    Ok(())
}

// ==================== compare ====================

pub struct CompareArgs {
    pub country: String,
    pub population: Option<u64>,
    pub urban: Option<f64>,
    pub baseline_population: Option<u64>,
    pub baseline_urban: Option<f64>,
}

/// Baseline and scenario inputs with the per-category table
#[derive(Debug, Serialize)]
pub struct CompareReport {
    country: String,
    baseline_population: Option<f64>,
    baseline_urban_percent: f64,
    new_population: Option<f64>,
    new_urban_percent: f64,
    rows: Vec<ComparisonRow>,
}

pub fn compare_report(ctx: &Context, args: &CompareArgs) -> Result<CompareReport> {
    let dataset = ctx.load_scenario_dataset()?;
    let mut session = ScenarioSession::with_config(&dataset, &ctx.config);
    session.select_country(&args.country)?;

    apply_inputs(
        session.baseline_mut(),
        args.baseline_population,
        args.baseline_urban,
    );
    apply_inputs(session.scenario_mut(), args.population, args.urban);

    let Some(rows) = session.comparison() else {
        bail!("cannot compare for {}: no population to compare", args.country);
    };

    Ok(CompareReport {
        country: args.country.clone(),
        baseline_population: session.baseline().total_population(),
        baseline_urban_percent: session.baseline().urban_percentage(),
        new_population: session.scenario().total_population(),
        new_urban_percent: session.scenario().urban_percentage(),
        rows,
    })
}

pub fn compare(ctx: &Context, args: &CompareArgs) -> Result<()> {
    let report = compare_report(ctx, args)?;
    if ctx.json {
        return print_json(&report);
    }

    println!(
        "{:<36} {:>12} {:>12} {:>10} {:>8}",
        "Category", "Baseline", "New", "Delta", "MAPE"
    );
    println!("{:-<36} {:-<12} {:-<12} {:-<10} {:-<8}", "", "", "", "", "");
    for row in &report.rows {
        println!(
            "{:<36} {:>12} {:>12} {:>10} {:>8}",
            row.category,
            row.baseline.map_or_else(|| "n/a".to_string(), human_readable_magnitude),
            row.new.map_or_else(|| "n/a".to_string(), human_readable_magnitude),
            row.delta.to_string(),
            format_percentage(row.mape)
        );
    }
    Ok(())
}

// ==================== summary ====================

pub fn summary(ctx: &Context, country: &str, category: Option<&str>) -> Result<()> {
    let summary = match category {
        Some(category) => {
            let dataset = ctx.load_scenario_dataset()?;
            let record = dataset.record(country, category)?;
            StandardizedRegression::new(record)
                .with_label(format!("{country} / {category}"))
                .summary()
        }
        None if ctx.config.scenario => bail!("scenario datasets need --category"),
        None => {
            let dataset = ctx.load_dataset()?;
            let record = dataset.record(country)?;
            StandardizedRegression::new(record)
                .with_label(country)
                .summary()
        }
    };

    if ctx.json {
        return print_json(&summary);
    }
    print!("{summary}");
    Ok(())
}

/// Override the country defaults with whatever the user passed
fn apply_inputs(inputs: &mut PopulationInputs, population: Option<u64>, urban: Option<f64>) {
    if let Some(population) = population {
        inputs.set_total_population(population.to_string());
    }
    if let Some(urban) = urban {
        inputs.set_urban_percentage(urban);
    }
}
