pub mod employee;
pub mod employment_history;
pub mod insight_info;
pub mod operation_log;
pub mod private_info;
pub mod project_info;
pub mod related_info;
pub mod skill_info;

pub use employee::{Employee, EmployeeCreate, EmployeeUpdate};
pub use employment_history::{EmploymentHistory, EmploymentHistoryCreate, EmploymentHistoryUpdate};
pub use insight_info::{InsightInfo, InsightInfoCreate, InsightInfoUpdate};
pub use operation_log::{OperationLog, OperationLogCreate, OperationLogUpdate};
pub use private_info::{PrivateInfo, PrivateInfoCreate, PrivateInfoUpdate};
pub use project_info::{ProjectInfo, ProjectInfoCreate, ProjectInfoUpdate};
pub use related_info::{RelatedInfo, RelatedInfoCreate, RelatedInfoUpdate};
pub use skill_info::{SkillInfo, SkillInfoCreate, SkillInfoUpdate};
