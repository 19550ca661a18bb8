//! Scripted routing provider for tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use route_planner::error::TransportError;
use route_planner::geo;
use route_planner::models::RouteCandidate;
use route_planner::polyline::Polyline;
use route_planner::traits::RouteTransport;

/// What a scripted provider answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Transport-level failure.
    Fail,
    /// Success with an empty route list.
    Empty,
    /// One route straight through the requested waypoints.
    Echo,
    Routes(Vec<RouteCandidate>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub base_url: String,
    pub waypoints: Vec<(f64, f64)>,
    pub alternatives: bool,
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, Reply>,
    delays: HashMap<usize, Duration>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, base_url: &str, reply: Reply) -> Self {
        self.replies.insert(base_url.to_string(), reply);
        self
    }

    /// Delays answers for requests with exactly `waypoints` points.
    pub fn delay(mut self, waypoints: usize, delay: Duration) -> Self {
        self.delays.insert(waypoints, delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl RouteTransport for ScriptedTransport {
    fn fetch_routes(
        &self,
        base_url: &str,
        waypoints: &[(f64, f64)],
        alternatives: bool,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>, TransportError>> + Send {
        self.calls.lock().unwrap().push(Call {
            base_url: base_url.to_string(),
            waypoints: waypoints.to_vec(),
            alternatives,
        });

        let delay = self.delays.get(&waypoints.len()).copied();
        let reply = match self.replies.get(base_url).cloned().unwrap_or(Reply::Fail) {
            Reply::Fail => Err(TransportError::Malformed("scripted failure".to_string())),
            Reply::Empty => Ok(Vec::new()),
            Reply::Echo => Ok(vec![echo(waypoints)]),
            Reply::Routes(routes) => Ok(routes),
        };

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            reply
        }
    }
}

/// A route whose geometry is the waypoints themselves, at 10 m/s.
pub fn echo(waypoints: &[(f64, f64)]) -> RouteCandidate {
    let distance = geo::path_length_meters(waypoints);
    RouteCandidate {
        polyline: Polyline::new(waypoints.to_vec()),
        distance_meters: distance,
        duration_seconds: distance / 10.0,
    }
}

pub fn candidate(points: Vec<(f64, f64)>, distance_meters: f64, duration_seconds: f64) -> RouteCandidate {
    RouteCandidate {
        polyline: Polyline::new(points),
        distance_meters,
        duration_seconds,
    }
}
