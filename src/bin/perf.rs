use todo_bench::api::{RemoteTodos, api_url_from_env};
use todo_bench::bench::{ITERATION_COUNTS, results_filename, run_benchmark};
use todo_bench::record::append_result;

fn main() {
    let mut api = RemoteTodos::new(api_url_from_env());
    let mut rng = rand::rng();
    eprintln!("benchmarking {}", api.base_url());

    for &iterations in ITERATION_COUNTS {
        let result = run_benchmark(&mut api, iterations, &mut rng);

        let filename = results_filename(iterations);
        match append_result(&filename, &result) {
            Ok(()) => println!("\nresults saved to {}", filename),
            Err(e) => eprintln!("failed to save results to {}: {}", filename, e),
        }

        println!("{}", result);
    }
}
