use std::time::Duration;

#[derive(Default)]
pub struct Timings {
    /// Compile duration of each unit, in the order they were compiled.
    pub unit_times: Vec<(String, Duration)>,
    pub total_time: Duration,
}

impl Timings {
    pub fn record(&mut self, unit: &str, elapsed: Duration) {
        self.unit_times.push((String::from(unit), elapsed));
    }

    pub fn emit(&self) {
        println!("=====================");
        println!("JACKC COMPILE TIMINGS:");
        println!("=====================");

        for (unit, elapsed) in &self.unit_times {
            println!("{} duration: {:#?}", unit, elapsed);
        }
        println!("total duration: {:#?}", self.total_time);

        println!("=====================");
    }
}
