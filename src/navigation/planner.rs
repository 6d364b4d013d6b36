use super::models::{Category, MapLocation, NavigationPath, UserPosition};

/// Id and display name of the synthetic start location used for routes from the user.
pub const CURRENT_POSITION_ID: &str = "current";
pub const CURRENT_POSITION_NAME: &str = "Ma position";

/// Walking assumptions for route estimates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoutePolicy {
    /// Scene units covered per minute.
    pub walk_speed: f64,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self { walk_speed: 5.0 }
    }
}

/// Straight-line route planner: no graph search and no obstacle avoidance.
#[derive(Copy, Clone, Debug, Default)]
pub struct NavigationPlanner {
    policy: RoutePolicy,
}

impl NavigationPlanner {
    /// A non-positive or non-finite walk speed is replaced by the default.
    pub fn new(policy: RoutePolicy) -> Self {
        if policy.walk_speed.is_finite() && policy.walk_speed > 0.0 {
            Self { policy }
        } else {
            Self::default()
        }
    }

    pub fn policy(&self) -> RoutePolicy {
        self.policy
    }

    pub fn plan_route(&self, from: &UserPosition, to: &MapLocation) -> NavigationPath {
        let start = MapLocation {
            terminal: from.terminal.clone(),
            ..MapLocation::new(CURRENT_POSITION_ID, CURRENT_POSITION_NAME, Category::Service, from.position.into())
        };
        self.plan_between(start, to.clone())
    }

    /// Route between two arbitrary locations.
    pub fn plan_between(&self, start: MapLocation, end: MapLocation) -> NavigationPath {
        let distance_units = start.position.planar_distance(&end.position);
        let estimated_minutes = estimate_minutes(distance_units, self.policy.walk_speed);
        NavigationPath {
            waypoints: vec![start.position, end.position],
            start,
            end,
            distance_units,
            estimated_minutes,
        }
    }
}

/// Ceiling of `distance / speed`; zero only for a zero distance.
fn estimate_minutes(distance: f64, speed: f64) -> u32 {
    if distance <= 0.0 {
        return 0;
    }
    (distance / speed).ceil().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::models::Vec3;
    use chrono::Utc;

    fn user_at(p: [f64; 3]) -> UserPosition {
        UserPosition::new(p.into(), Some("Central"), Utc::now())
    }

    #[test]
    fn route_to_gate_a5() {
        let gate = MapLocation::new("A5", "Porte A5", Category::Gate, [-40.0, 0.0, -30.0]).with_terminal("A");
        let path = NavigationPlanner::default().plan_route(&user_at([5.0, 0.0, 5.0]), &gate);
        assert!((path.distance_units - 3250f64.sqrt()).abs() < 1e-9);
        assert!((path.distance_units - 57.01).abs() < 0.01);
        assert_eq!(path.estimated_minutes, 12);
        assert_eq!(path.waypoints, vec![Vec3::new(5.0, 0.0, 5.0), Vec3::new(-40.0, 0.0, -30.0)]);
        assert_eq!(path.start.id, CURRENT_POSITION_ID);
        assert_eq!(path.end, gate);
    }

    #[test]
    fn endpoints_match_waypoints() {
        let dest = MapLocation::new("p", "P", Category::Parking, [70.0, 3.0, 70.0]);
        let path = NavigationPlanner::default().plan_route(&user_at([1.0, 0.0, 2.0]), &dest);
        assert_eq!(path.waypoints.first(), Some(&path.start.position));
        assert_eq!(path.waypoints.last(), Some(&path.end.position));
    }

    #[test]
    fn distance_is_symmetric() {
        let planner = NavigationPlanner::default();
        let a = MapLocation::new("a", "A", Category::Gate, [-12.5, 0.0, 7.0]);
        let b = MapLocation::new("b", "B", Category::Shop, [33.0, 9.0, -41.25]);
        let ab = planner.plan_between(a.clone(), b.clone());
        let ba = planner.plan_between(b, a);
        assert_eq!(ab.distance_units, ba.distance_units);
    }

    #[test]
    fn tiny_distance_takes_at_least_a_minute_and_zero_takes_none() {
        let planner = NavigationPlanner::default();
        let here = MapLocation::new("h", "H", Category::Service, [5.0, 0.0, 5.0]);
        assert_eq!(planner.plan_route(&user_at([5.0, 0.0, 5.0]), &here).estimated_minutes, 0);
        assert_eq!(planner.plan_route(&user_at([5.0, 0.0, 5.01]), &here).estimated_minutes, 1);
    }

    #[test]
    fn invalid_walk_speed_falls_back_to_default() {
        let dest = MapLocation::new("A5", "Porte A5", Category::Gate, [-40.0, 0.0, -30.0]);
        for speed in [0.0, -5.0, f64::NAN] {
            let planner = NavigationPlanner::new(RoutePolicy { walk_speed: speed });
            assert_eq!(planner.policy(), RoutePolicy::default());
            assert_eq!(planner.plan_route(&user_at([5.0, 0.0, 5.0]), &dest).estimated_minutes, 12);
        }
    }

    #[test]
    fn walk_speed_scales_estimate() {
        let planner = NavigationPlanner::new(RoutePolicy { walk_speed: 10.0 });
        let dest = MapLocation::new("d", "D", Category::Exit, [0.0, 0.0, 25.0]);
        assert_eq!(planner.plan_route(&user_at([0.0, 0.0, 0.0]), &dest).estimated_minutes, 3);
    }
}
