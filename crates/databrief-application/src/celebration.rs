//! Decorative celebration burst shown when a report lands.
//!
//! Purely visual and entirely outside the data model: the task runs
//! detached on the runtime, emits on a fixed cadence, and terminates
//! itself at a fixed deadline regardless of what the report does.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

/// Receives particle bursts. Hosts map this onto whatever confetti
/// they can draw; tests record the calls.
pub trait ParticleSink: Send + Sync {
    /// Emit `count` particles from `origin` (fractions of the view,
    /// x rightwards, y downwards).
    fn burst(&self, count: u32, origin: (f32, f32));
}

/// A timed burst: fixed window, fixed cadence, particle count decaying
/// linearly to zero over the window.
#[derive(Debug, Clone, Copy)]
pub struct CelebrationBurst {
    pub duration: Duration,
    pub cadence: Duration,
    pub peak_particles: u32,
}

impl Default for CelebrationBurst {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(3),
            cadence: Duration::from_millis(250),
            peak_particles: 50,
        }
    }
}

impl CelebrationBurst {
    /// Spawns the burst. The task self-terminates on its deadline and
    /// never blocks a core state transition; dropping the handle
    /// leaves it running to completion.
    pub fn spawn(self, sink: Arc<dyn ParticleSink>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let deadline = tokio::time::Instant::now() + self.duration;
            let mut ticker = tokio::time::interval(self.cadence);
            // The first interval tick completes immediately; consume
            // it so bursts start one cadence in.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let now = tokio::time::Instant::now();
                if now >= deadline {
                    break;
                }
                let time_left = deadline - now;
                let count = (f64::from(self.peak_particles) * time_left.as_secs_f64()
                    / self.duration.as_secs_f64())
                .round() as u32;

                let mut rng = rand::thread_rng();
                let origin = (rng.r#gen::<f32>(), rng.r#gen::<f32>() - 0.2);
                sink.burst(count, origin);
            }
            tracing::debug!(target: "celebration", "Celebration burst finished");
        })
    }
}
