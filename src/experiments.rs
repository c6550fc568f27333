use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use rand::Rng;
use rustc_hash::FxHashMap;

use crate::{
    generators::{
        generate_barabasi_albert_graph, generate_erdos_renyi_bipartite_graph,
        generate_erdos_renyi_graph,
    },
    matching::compute_max_bipartite_matching_size,
    network::{FlowAlgorithm, FlowNetwork},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GraphModel {
    ErdosRenyi { p: f64 },
    BarabasiAlbert { m: usize },
}

impl GraphModel {
    pub fn generate(
        &self,
        rng: &mut impl Rng,
        n: usize,
        max_capacity: u64,
    ) -> Vec<FxHashMap<usize, u64>> {
        match *self {
            GraphModel::ErdosRenyi { p } => generate_erdos_renyi_graph(rng, n, p, max_capacity),
            GraphModel::BarabasiAlbert { m } => {
                generate_barabasi_albert_graph(rng, n, m, max_capacity)
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ExperimentConfig {
    pub algorithm: FlowAlgorithm,
    pub min_size: usize,
    pub max_size: usize,
    pub step: usize,
    pub trials: usize,
    pub max_capacity: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            algorithm: FlowAlgorithm::Dinitz,
            min_size: 5,
            max_size: 100,
            step: 5,
            trials: 100,
            max_capacity: 30,
        }
    }
}

impl ExperimentConfig {
    fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.min_size..self.max_size).step_by(self.step.max(1))
    }
}

/// Averages over the trials of one graph size.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentRow {
    pub size: usize,
    pub average_time: Duration,
    pub average_iterations: f64,
    pub non_zero_flows: usize,
}

struct RowAccumulator {
    size: usize,
    total_time: Duration,
    iterations: usize,
    non_zero_flows: usize,
}

impl RowAccumulator {
    fn new(size: usize) -> Self {
        Self {
            size,
            total_time: Duration::ZERO,
            iterations: 0,
            non_zero_flows: 0,
        }
    }

    fn record(&mut self, elapsed: Duration, iterations: usize, value: u64) {
        self.total_time += elapsed;
        self.iterations += iterations;
        if value > 0 {
            self.non_zero_flows += 1;
        }
    }

    fn finish(self, trials: usize) -> ExperimentRow {
        let trials = trials.max(1);
        let row = ExperimentRow {
            size: self.size,
            average_time: self.total_time / trials as u32,
            average_iterations: self.iterations as f64 / trials as f64,
            non_zero_flows: self.non_zero_flows,
        };
        log::info!(
            "n = {} average time = {:.2?} non-zero flows = {} average iterations = {:.2}",
            row.size,
            row.average_time,
            row.non_zero_flows,
            row.average_iterations
        );
        row
    }
}

/// Times max-flow on random graphs of growing size, from vertex 0 to the
/// last vertex.
pub fn average_time_experiment(
    rng: &mut impl Rng,
    model: GraphModel,
    config: &ExperimentConfig,
) -> Vec<ExperimentRow> {
    let mut results = vec![];

    for size in config.sizes() {
        if size < 2 {
            continue;
        }
        let mut row = RowAccumulator::new(size);

        for _ in 0..config.trials {
            let graph = model.generate(rng, size, config.max_capacity);
            let network = match FlowNetwork::from_graph(graph.as_slice(), 0, size - 1) {
                Ok(network) => network,
                Err(err) => {
                    log::error!("Skipping generated graph: {}", err);
                    continue;
                }
            };

            let start = Instant::now();
            let (flow, iterations) = network.compute_max_flow(config.algorithm);
            row.record(start.elapsed(), iterations, flow.value(network.source()));
        }

        results.push(row.finish(config.trials));
    }

    results
}

/// Times the matching reduction on random bipartite graphs with `size`
/// vertices per side.
pub fn bipartite_reduction_experiment(
    rng: &mut impl Rng,
    p: f64,
    config: &ExperimentConfig,
) -> Vec<ExperimentRow> {
    let mut results = vec![];

    for size in config.sizes() {
        let mut row = RowAccumulator::new(size);

        for _ in 0..config.trials {
            let graph = generate_erdos_renyi_bipartite_graph(rng, size, p);

            let start = Instant::now();
            let (matching_size, iterations) =
                compute_max_bipartite_matching_size(&graph, config.algorithm);
            row.record(start.elapsed(), iterations, matching_size as u64);
        }

        results.push(row.finish(config.trials));
    }

    results
}

pub fn write_results(output: &mut impl Write, rows: &[ExperimentRow]) -> io::Result<()> {
    writeln!(output, "n,average_time_us,average_iterations,non_zero_flows")?;
    for row in rows {
        writeln!(
            output,
            "{},{:.3},{:.2},{}",
            row.size,
            row.average_time.as_secs_f64() * 1e6,
            row.average_iterations,
            row.non_zero_flows
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn small_config(algorithm: FlowAlgorithm) -> ExperimentConfig {
        ExperimentConfig {
            algorithm,
            min_size: 5,
            max_size: 20,
            step: 5,
            trials: 4,
            max_capacity: 10,
        }
    }

    #[test]
    fn one_row_per_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let rows = average_time_experiment(
            &mut rng,
            GraphModel::ErdosRenyi { p: 0.3 },
            &small_config(FlowAlgorithm::Dinitz),
        );
        assert_eq!(
            rows.iter().map(|row| row.size).collect::<Vec<_>>(),
            vec![5, 10, 15]
        );
        assert!(rows.iter().all(|row| row.non_zero_flows <= 4));
    }

    #[test]
    fn complete_bipartite_always_matches() {
        let mut rng = StdRng::seed_from_u64(2);
        let rows = bipartite_reduction_experiment(
            &mut rng,
            1.0,
            &small_config(FlowAlgorithm::EdmondsKarp),
        );
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(row.non_zero_flows, 4);
            assert!(row.average_iterations >= 1.0);
        }
    }

    #[test]
    fn csv_output() {
        let rows = vec![ExperimentRow {
            size: 5,
            average_time: Duration::from_micros(12),
            average_iterations: 1.5,
            non_zero_flows: 3,
        }];
        let mut output = vec![];
        write_results(&mut output, &rows).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "n,average_time_us,average_iterations,non_zero_flows\n5,12.000,1.50,3\n"
        );
    }
}
