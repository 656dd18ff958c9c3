pub mod stage1_prepare;
pub mod stage2_stratify;
pub mod stage3_scenarios;
pub mod stage4_report;
