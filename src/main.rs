#![allow(non_snake_case)]
use RiemannSums::Utils::logger::init_logger;
use RiemannSums::Utils::plots::{animate_refinement, plot_riemann_sums};
use RiemannSums::numerical::Riemann_sums::RiemannSum;
use RiemannSums::numerical::integration_task::IntegrationTask;
use log::{error, info};
use std::env;
use std::error::Error;
use std::process::ExitCode;
use tabled::{builder::Builder, settings::Style};

/// usage: RiemannSums [task_file]
/// without a task file the default task is used: 3x^3 + 3x^2 - 2x + 1 on [-1, 1],
/// comparison with width 1, right rule animated from width 1 to 0.01
fn main() -> ExitCode {
    let task = match env::args().nth(1) {
        Some(path) => match IntegrationTask::from_file(&path) {
            Ok(task) => task,
            Err(e) => {
                eprintln!("cannot load task {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => IntegrationTask::default(),
    };
    if !init_logger(&task.loglevel, task.log_to_file) {
        eprintln!("logger was already initialized");
    }
    match run(&task) {
        Ok(()) => {
            info!("Program ended");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(task: &IntegrationTask) -> Result<(), Box<dyn Error>> {
    task.validate()?;
    let poly = task.polynomial();
    info!("f(x) = {}", poly);

    let estimator = RiemannSum::new(&poly, task.lower_lim, task.upper_lim)?;
    let mut builder = Builder::default();
    builder.push_record(["rule", "width", "approximate area"]);
    for (rule, area) in estimator.estimate_all(task.interval_len)? {
        builder.push_record([rule.label(), task.interval_len.to_string(), area.to_string()]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    info!(
        "\n \n RIEMANN SUMS OVER [{}, {}] \n \n {}",
        task.lower_lim, task.upper_lim, table
    );

    plot_riemann_sums(task, &task.comparison_plot)?;
    animate_refinement(task, &task.animation_gif)?;
    Ok(())
}
