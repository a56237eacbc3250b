use super::search::ProgressCallback;

/// Reports search progress through the `log` facade
pub struct ConsoleProgressCallback {
    pub report_every: usize,
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self { report_every: 10 }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_iteration_complete(&mut self, iteration: usize, score: f64, best_score: f64, retained: usize) {
        if self.report_every > 0 && (iteration + 1) % self.report_every == 0 {
            log::info!(
                "Iteration {} complete. Score: {:.1}%, best: {:.1}%, retained: {}",
                iteration + 1,
                score,
                best_score,
                retained
            );
        }
    }

    fn on_search_complete(&mut self, best_score: f64, retained: usize) {
        log::info!("Search complete. Best score: {:.1}%, retained trees: {}", best_score, retained);
    }
}

// For forwarding progress to a UI thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    IterationComplete { iteration: usize, score: f64, best_score: f64, retained: usize },
    SearchComplete { best_score: f64, retained: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_iteration_complete(&mut self, iteration: usize, score: f64, best_score: f64, retained: usize) {
        let _ = self.sender.send(ProgressMessage::IterationComplete {
            iteration,
            score,
            best_score,
            retained,
        });
    }

    fn on_search_complete(&mut self, best_score: f64, retained: usize) {
        let _ = self.sender.send(ProgressMessage::SearchComplete { best_score, retained });
    }
}
