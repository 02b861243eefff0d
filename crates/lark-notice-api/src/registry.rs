use std::collections::HashMap;

use crate::robot::{
    RobotProfile,
    RobotType,
};

/// Robot registry - maps robot type ids to their rendering profiles
pub struct RobotRegistry {
    robots: HashMap<String, Box<dyn RobotProfile>>,
}

impl RobotRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            robots: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in robot type
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for robot in RobotType::all() {
            registry.register(Box::new(*robot));
        }
        registry
    }

    /// Register a robot profile, replacing any profile with the same id
    pub fn register(&mut self, robot: Box<dyn RobotProfile>) {
        let id = robot.id().to_string();
        self.robots.insert(id, robot);
    }

    /// Get a robot profile by id
    pub fn get(&self, id: &str) -> Option<&dyn RobotProfile> {
        self.robots.get(id).map(|r| r.as_ref())
    }

    /// Look up a robot profile by id, falling back to the built-in aliases
    /// (e.g., "feishu" for "lark")
    pub fn resolve(&self, name: &str) -> Option<&dyn RobotProfile> {
        self.get(name).or_else(|| {
            let builtin: RobotType = name.parse().ok()?;
            self.get(builtin.id())
        })
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.robots.contains_key(id)
    }

    /// Get all registered robot ids, sorted
    pub fn robot_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.robots.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn count(&self) -> usize {
        self.robots.len()
    }
}

impl Default for RobotRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
