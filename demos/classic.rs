use langton_engine::Simulation;
use std::thread;
use std::time::Duration;

fn main() {
    let mut simulation = Simulation::classic();
    simulation.set_interval(25);
    simulation.start();

    // The driver owns the clock: it schedules ticks at the stored interval
    // while the running flag holds, and stops when it drops.
    while simulation.is_running() && simulation.step_count() < 12_000 {
        simulation.tick();
        simulation.draw();
        thread::sleep(Duration::from_millis(simulation.interval_ms()));
    }
}
