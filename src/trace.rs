use crate::grid::CellColor;
use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter};

pub(crate) fn create_trace_logger(
    filename: Option<String>,
    grid_size: usize,
) -> Box<dyn TraceLogger> {
    match filename {
        None => Box::new(NoOpTraceLogger {}),
        Some(filename) => Box::new(JsonTraceLogger::new(filename, grid_size)),
    }
}

pub trait TraceLogger: Send + Sync {
    #[allow(unused_variables)]
    fn log_step(&mut self, step: usize, positions: Vec<(usize, usize)>) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, step: usize, event: Event) {}

    fn clear(&mut self) {}

    fn save(&self) {}

    fn log_paint(
        &mut self,
        step: usize,
        agent_id: String,
        location: (usize, usize),
        color: CellColor,
    ) {
        self.log_event(
            step,
            Event {
                event_type: EventType::Paint,
                agent_id: Some(agent_id),
                location: Some(location),
                destination: None,
                color: Some(color),
            },
        );
    }

    fn log_move(
        &mut self,
        step: usize,
        agent_id: String,
        location: (usize, usize),
        destination: (usize, usize),
    ) {
        self.log_event(
            step,
            Event {
                event_type: EventType::Move,
                agent_id: Some(agent_id),
                location: Some(location),
                destination: Some(destination),
                color: None,
            },
        );
    }

    fn log_missing_rule(&mut self, step: usize, agent_id: String, color: CellColor) {
        self.log_event(
            step,
            Event {
                event_type: EventType::MissingRule,
                agent_id: Some(agent_id),
                location: None,
                destination: None,
                color: Some(color),
            },
        );
    }
}

#[derive(serde::Serialize)]
enum EventType {
    Paint,
    Move,
    MissingRule,
}

#[derive(serde::Serialize)]
pub struct Event {
    event_type: EventType,
    agent_id: Option<String>,
    location: Option<(usize, usize)>,
    destination: Option<(usize, usize)>,
    color: Option<CellColor>,
}

struct Step {
    step: usize,
    positions: Vec<(usize, usize)>,
}

struct NoOpTraceLogger;
impl TraceLogger for NoOpTraceLogger {}

struct JsonTraceLogger {
    filename: String,
    grid_size: usize,
    steps: Vec<Step>,
    events: HashMap<usize, Vec<Event>>,
}

impl JsonTraceLogger {
    pub fn new(filename: String, grid_size: usize) -> JsonTraceLogger {
        JsonTraceLogger {
            filename,
            grid_size,
            steps: Vec::new(),
            events: HashMap::new(),
        }
    }
}

impl TraceLogger for JsonTraceLogger {
    fn log_step(&mut self, step: usize, positions: Vec<(usize, usize)>) {
        self.steps.push(Step { step, positions });
    }

    fn log_event(&mut self, step: usize, event: Event) {
        self.events.entry(step).or_default().push(event);
    }

    fn clear(&mut self) {
        self.steps.clear();
        self.events.clear();
    }

    fn save(&self) {
        let file = File::create(&self.filename).unwrap();
        let steps: Vec<_> = self
            .steps
            .iter()
            .map(|step| {
                json!({
                    "step": step.step,
                    "positions": step.positions,
                    "events": self.events.get(&step.step).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        let data = json!({
            "grid": {
                "size": self.grid_size,
            },
            "steps": steps,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data).unwrap();
    }
}
