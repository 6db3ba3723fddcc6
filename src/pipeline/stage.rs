use serde::{Deserialize, Serialize};
use std::fmt;

/// The four independently schedulable pipeline units, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Extract,
    Load,
    Transform,
    Archive,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Extract, Stage::Load, Stage::Transform, Stage::Archive];

    /// Task identifier used by the external scheduler
    pub fn task_id(self) -> &'static str {
        match self {
            Stage::Extract => "extract_api_data",
            Stage::Load => "load_json_to_mongodb",
            Stage::Transform => "transform_add_contribution",
            Stage::Archive => "upload_to_s3",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extract => "extract",
            Stage::Load => "load",
            Stage::Transform => "transform",
            Stage::Archive => "archive",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_and_ids() {
        let ids: Vec<_> = Stage::ALL.iter().map(|s| s.task_id()).collect();
        assert_eq!(
            ids,
            vec![
                "extract_api_data",
                "load_json_to_mongodb",
                "transform_add_contribution",
                "upload_to_s3"
            ]
        );
        assert_eq!(Stage::Transform.to_string(), "transform");
    }
}
