//! Evaluate a set of branch predictors against a trace.

use std::path::PathBuf;

use anyhow::{ bail, Context };
use clap::Parser;
use serde::Serialize;

use bpsim::*;
use bpsim::sim::{ self, Evaluation };
use bpsim::trace::synth::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a trace file (`<address> <T|N>` per line)
    trace_path: Option<PathBuf>,

    /// Generate a single-branch synthetic trace instead of reading a file,
    /// e.g. `loop:8`, `alternating`, `pattern:TTN`, `random:0.7`
    #[arg(long, conflicts_with = "trace_path")]
    synthetic: Option<BranchPattern>,

    /// Number of records in a synthetic trace
    #[arg(long, default_value_t = 10_000)]
    len: usize,

    /// Seed used for random synthetic traces
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Path to a JSON file listing the predictors to evaluate
    #[arg(short, long, conflicts_with = "predictor")]
    config: Option<PathBuf>,

    /// Predictor to evaluate with default parameters (repeatable)
    #[arg(short, long)]
    predictor: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// List the N most mispredicted branches for each predictor
    #[arg(long, default_value_t = 0)]
    top: usize,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    trace: &'a str,
    records: usize,
    results: Vec<JsonEntry>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonEntry {
    Ok {
        #[serde(flatten)]
        report: Report,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        worst_branches: Vec<JsonBranch>,
    },
    Err { config: String, error: String },
}

#[derive(Serialize)]
struct JsonBranch {
    addr: String,
    occurrences: u64,
    misses: u64,
    taken_rate: f64,
}

fn json_entry(eval: Evaluation, top: usize) -> JsonEntry {
    match eval.result {
        Ok((report, stats)) => JsonEntry::Ok {
            report,
            worst_branches: stats.worst_branches(top).into_iter()
                .map(|(addr, data)| JsonBranch {
                    addr: format!("{:#x}", addr),
                    occurrences: data.occ,
                    misses: data.misses(),
                    taken_rate: data.taken_rate(),
                })
                .collect(),
        },
        Err(e) => JsonEntry::Err {
            config: format!("{:?}", eval.config),
            error: e.to_string(),
        },
    }
}

fn load_trace(args: &Cli) -> anyhow::Result<Trace> {
    match (&args.trace_path, &args.synthetic) {
        (Some(path), _) => Trace::from_file(path)
            .with_context(|| format!("reading {}", path.display())),
        (None, Some(pattern)) => {
            let records = TraceSynthesizer::new(args.seed)
                .branch(0x1000, pattern.clone())
                .generate(args.len);
            Ok(Trace::new(format!("synthetic {:?}", pattern), records))
        },
        (None, None) => bail!("expected a trace path or --synthetic <PATTERN>"),
    }
}

fn load_config(args: &Cli) -> anyhow::Result<EvaluationConfig> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg = EvaluationConfig::from_json(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    } else if !args.predictor.is_empty() {
        EvaluationConfig::from_names(args.predictor.as_slice()).with_context(|| {
            format!("known predictors: {}", PredictorConfig::NAMES.join(", "))
        })
    } else {
        Ok(EvaluationConfig::default())
    }
}

fn print_text(trace: &Trace, results: &[Evaluation], top: usize) {
    println!("[*] {}, {} records", trace.name(), trace.len());
    let mut reports = Vec::new();
    for eval in results {
        match &eval.result {
            Ok((report, stats)) => {
                println!();
                print!("{}", report);
                if top > 0 {
                    println!("  most mispredicted branches:");
                    for (addr, data) in stats.worst_branches(top) {
                        println!("    {:016x} {:8}/{:8} missed ({:.2}% taken)",
                            addr, data.misses(), data.occ,
                            data.taken_rate() * 100.0);
                    }
                }
                reports.push(report.clone());
            },
            Err(e) => {
                println!();
                println!("{:?}: configuration error: {}", eval.config, e);
            },
        }
    }
    println!();
    println!("{}", render_summary(&reports));
}

fn print_json(trace: &Trace, results: Vec<Evaluation>, top: usize)
    -> anyhow::Result<()>
{
    let results = results.into_iter()
        .map(|eval| json_entry(eval, top))
        .collect();
    let out = JsonResult {
        trace: trace.name(),
        records: trace.len(),
        results,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")
    ).init();

    let args = Cli::parse();
    let cfg = load_config(&args)?;
    let trace = load_trace(&args)?;
    let results = sim::evaluate(&cfg, trace.as_slice());

    if args.json {
        print_json(&trace, results, args.top)?;
    } else {
        print_text(&trace, &results, args.top);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn session() -> Vec<Evaluation> {
        let cfg = EvaluationConfig {
            predictors: vec![
                PredictorConfig::TwoBit { index_bits: 4 },
                PredictorConfig::OneBit { index_bits: 0 },
            ],
        };
        let records = TraceSynthesizer::new(0)
            .branch(0x40, BranchPattern::Loop(4))
            .branch(0x44, BranchPattern::AlwaysTaken)
            .generate(80);
        sim::evaluate(&cfg, &records)
    }

    #[test]
    fn json_lists_worst_branches() {
        let mut results = session().into_iter();
        let entry = json_entry(results.next().unwrap(), 1);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "TwoBit");
        assert_eq!(json["worst_branches"].as_array().map(|b| b.len()), Some(1));
        assert_eq!(json["worst_branches"][0]["addr"], "0x40");
        assert_eq!(json["worst_branches"][0]["occurrences"], 40);

        let err = serde_json::to_value(json_entry(results.next().unwrap(), 1))
            .unwrap();
        assert!(err["error"].as_str().unwrap().contains("index_bits"));
    }

    #[test]
    fn json_omits_branches_without_top() {
        let entry = json_entry(session().into_iter().next().unwrap(), 0);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("worst_branches").is_none());
        assert_eq!(json["correct"].as_u64().map(|c| c + json["incorrect"]
            .as_u64().unwrap_or(0)), Some(80));
    }
}
