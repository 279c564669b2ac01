// Compile pipeline phases
//
// Each phase is self-contained and runs once, in file order. A failing phase
// stops the pipeline, so later phases can rely on what earlier ones recorded
// in the compile context.

#[path = "01_stage.rs"]
pub mod stage;
#[path = "02_transform.rs"]
pub mod transform;
#[path = "03_build.rs"]
pub mod build;
#[path = "04_collect.rs"]
pub mod collect;
#[path = "05_cleanup.rs"]
pub mod cleanup;
