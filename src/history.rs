//! Per-epoch training history records
//!
//! Two record shapes exist, one per training objective. They are an explicit
//! tagged union so rendering code dispatches on the variant instead of
//! probing for field presence. Within a record every sequence has the same
//! length at every observation point; the epoch index is implicit from
//! position (1-based for display).

use crate::error::ToolkitError;

/// History of an adversarially trained model.
#[derive(Debug, Clone, Default)]
pub struct GanHistory {
    /// Discriminator loss per epoch
    pub d_loss: Vec<f64>,
    /// Generator loss per epoch
    pub g_loss: Vec<f64>,
    /// Sample diversity per epoch
    pub diversity: Vec<f64>,
    /// Mean critic score on real samples
    pub real_scores: Vec<f64>,
    /// Mean critic score on generated samples
    pub fake_scores: Vec<f64>,
}

impl GanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the just-completed epoch's metrics by name.
    ///
    /// All names are validated before anything is pushed; an unknown name
    /// fails the whole append and leaves every sequence unmodified.
    pub fn append_epoch(&mut self, metrics: &[(&str, f64)]) -> Result<(), ToolkitError> {
        for (name, _) in metrics {
            if !matches!(
                *name,
                "d_loss" | "g_loss" | "diversity" | "real_scores" | "fake_scores"
            ) {
                return Err(ToolkitError::UnknownMetric {
                    name: (*name).to_string(),
                    record: "adversarial",
                });
            }
        }
        for (name, value) in metrics {
            match *name {
                "d_loss" => self.d_loss.push(*value),
                "g_loss" => self.g_loss.push(*value),
                "diversity" => self.diversity.push(*value),
                "real_scores" => self.real_scores.push(*value),
                "fake_scores" => self.fake_scores.push(*value),
                _ => unreachable!("validated above"),
            }
        }
        Ok(())
    }

    /// Number of recorded epochs (length of the primary loss sequence).
    pub fn num_epochs(&self) -> usize {
        self.d_loss.len()
    }
}

/// History of a model trained with a Sinkhorn/optimal-transport objective.
#[derive(Debug, Clone, Default)]
pub struct SinkhornHistory {
    /// Sinkhorn loss per epoch
    pub loss: Vec<f64>,
    /// Sample diversity per epoch
    pub diversity: Vec<f64>,
}

impl SinkhornHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the just-completed epoch's metrics by name. Atomic on failure.
    pub fn append_epoch(&mut self, metrics: &[(&str, f64)]) -> Result<(), ToolkitError> {
        for (name, _) in metrics {
            if !matches!(*name, "loss" | "diversity") {
                return Err(ToolkitError::UnknownMetric {
                    name: (*name).to_string(),
                    record: "optimal-transport",
                });
            }
        }
        for (name, value) in metrics {
            match *name {
                "loss" => self.loss.push(*value),
                "diversity" => self.diversity.push(*value),
                _ => unreachable!("validated above"),
            }
        }
        Ok(())
    }

    pub fn num_epochs(&self) -> usize {
        self.loss.len()
    }
}

/// A training history record of either shape.
#[derive(Debug, Clone)]
pub enum History {
    Adversarial(GanHistory),
    OptimalTransport(SinkhornHistory),
}

impl History {
    pub fn adversarial() -> Self {
        History::Adversarial(GanHistory::new())
    }

    pub fn optimal_transport() -> Self {
        History::OptimalTransport(SinkhornHistory::new())
    }

    /// Append the just-completed epoch's metrics by name.
    pub fn append_epoch(&mut self, metrics: &[(&str, f64)]) -> Result<(), ToolkitError> {
        match self {
            History::Adversarial(h) => h.append_epoch(metrics),
            History::OptimalTransport(h) => h.append_epoch(metrics),
        }
    }

    /// Number of recorded epochs.
    pub fn num_epochs(&self) -> usize {
        match self {
            History::Adversarial(h) => h.num_epochs(),
            History::OptimalTransport(h) => h.num_epochs(),
        }
    }

    /// Diversity sequence of either variant.
    pub fn diversity(&self) -> &[f64] {
        match self {
            History::Adversarial(h) => &h.diversity,
            History::OptimalTransport(h) => &h.diversity,
        }
    }

    /// Latest value of a named sequence, if recorded.
    pub fn latest(&self, name: &str) -> Option<f64> {
        let series: &[f64] = match (self, name) {
            (History::Adversarial(h), "d_loss") => &h.d_loss,
            (History::Adversarial(h), "g_loss") => &h.g_loss,
            (History::Adversarial(h), "diversity") => &h.diversity,
            (History::Adversarial(h), "real_scores") => &h.real_scores,
            (History::Adversarial(h), "fake_scores") => &h.fake_scores,
            (History::OptimalTransport(h), "loss") => &h.loss,
            (History::OptimalTransport(h), "diversity") => &h.diversity,
            _ => return None,
        };
        series.last().copied()
    }

    /// Export the record to CSV, one row per epoch.
    pub fn save_csv(&self, path: &str) -> Result<(), ToolkitError> {
        let mut writer = csv::Writer::from_path(path)?;

        match self {
            History::Adversarial(h) => {
                writer.write_record([
                    "epoch",
                    "d_loss",
                    "g_loss",
                    "diversity",
                    "real_scores",
                    "fake_scores",
                ])?;
                for i in 0..h.num_epochs() {
                    writer.write_record([
                        (i + 1).to_string(),
                        h.d_loss[i].to_string(),
                        h.g_loss[i].to_string(),
                        h.diversity.get(i).copied().unwrap_or(f64::NAN).to_string(),
                        h.real_scores.get(i).copied().unwrap_or(f64::NAN).to_string(),
                        h.fake_scores.get(i).copied().unwrap_or(f64::NAN).to_string(),
                    ])?;
                }
            }
            History::OptimalTransport(h) => {
                writer.write_record(["epoch", "loss", "diversity"])?;
                for i in 0..h.num_epochs() {
                    writer.write_record([
                        (i + 1).to_string(),
                        h.loss[i].to_string(),
                        h.diversity.get(i).copied().unwrap_or(f64::NAN).to_string(),
                    ])?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order_and_length() {
        let mut history = History::adversarial();
        for epoch in 0..5 {
            history
                .append_epoch(&[
                    ("d_loss", epoch as f64),
                    ("g_loss", epoch as f64 * 2.0),
                    ("diversity", 1.0),
                    ("real_scores", 0.8),
                    ("fake_scores", 0.2),
                ])
                .unwrap();
        }

        assert_eq!(history.num_epochs(), 5);
        let History::Adversarial(h) = &history else {
            panic!("wrong variant");
        };
        assert_eq!(h.g_loss, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(h.diversity.len(), 5);
        assert_eq!(history.latest("d_loss"), Some(4.0));
    }

    #[test]
    fn test_unknown_metric_is_atomic() {
        let mut history = GanHistory::new();
        history.append_epoch(&[("d_loss", 1.0), ("g_loss", 2.0)]).unwrap();

        let err = history
            .append_epoch(&[("d_loss", 3.0), ("entropy", 0.1)])
            .unwrap_err();
        assert!(matches!(err, ToolkitError::UnknownMetric { .. }));
        assert!(err.to_string().contains("entropy"));

        // The failed append must not have touched any sequence.
        assert_eq!(history.d_loss, vec![1.0]);
        assert_eq!(history.g_loss, vec![2.0]);
    }

    #[test]
    fn test_sinkhorn_rejects_adversarial_fields() {
        let mut history = SinkhornHistory::new();
        let err = history.append_epoch(&[("d_loss", 1.0)]).unwrap_err();
        assert!(matches!(err, ToolkitError::UnknownMetric { .. }));
        assert!(history.loss.is_empty());
    }

    #[test]
    fn test_sinkhorn_append() {
        let mut history = History::optimal_transport();
        history
            .append_epoch(&[("loss", 0.5), ("diversity", 2.0)])
            .unwrap();
        assert_eq!(history.num_epochs(), 1);
        assert_eq!(history.diversity(), &[2.0]);
        assert_eq!(history.latest("loss"), Some(0.5));
        assert_eq!(history.latest("g_loss"), None);
    }

    #[test]
    fn test_save_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");

        let mut history = History::optimal_transport();
        history.append_epoch(&[("loss", 1.0)]).unwrap();
        history.append_epoch(&[("loss", 0.5)]).unwrap();
        history.save_csv(path.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("epoch,loss,diversity"));
        assert_eq!(content.lines().count(), 3);
    }
}
