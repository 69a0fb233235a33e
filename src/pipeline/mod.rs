pub mod stage1_extract;
pub mod stage2_cluster;
pub mod stage3_snapshots;
pub mod stage4_profiles;
pub mod stage5_impact;
pub mod stage6_report;
