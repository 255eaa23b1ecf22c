use langton_engine::{AgentConfig, Simulation, Turn};

fn main() {
    let trace_path = "/tmp/swarm_trace.json".to_string();
    let configs = AgentConfig::scatter(
        4,
        50,
        &[Turn::Left, Turn::Left, Turn::Right, Turn::Right],
        42,
    );

    let mut simulation = match Simulation::new(50, configs, Some(trace_path.clone())) {
        Ok(simulation) => simulation,
        Err(e) => panic!("Could not build the swarm scenario: {}", e),
    };

    simulation.start();
    for _ in 0..10_000 {
        simulation.tick();
    }
    simulation.pause();

    simulation.draw();
    simulation.save_trace();
    println!("\nTrace saved to {}", trace_path);
}
