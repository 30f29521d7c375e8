pub mod scene;

pub use scene::{
    AnimationSettings, RowSettings, SceneSettings, SceneSettingsSource,
};
