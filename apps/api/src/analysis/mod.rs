// AI analysis normalization layer.
// Consumes raw engine payloads and produces canonical AnalysisSummary values.
// The rest of the pipeline never touches a raw payload.

pub mod emphasis;
pub mod grading;
pub mod normalizer;
