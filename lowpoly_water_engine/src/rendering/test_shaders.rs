/// Recording shader doubles for the renderer tests
use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::rendering::shader::{ShaderProgram, TerrainShading, WaterShading};
use crate::scene::light::Light;

/// Shared call log, cloned out of a shader double before it is boxed
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct RecordingTerrainShader {
    pub calls: CallLog,
}

impl ShaderProgram for RecordingTerrainShader {
    fn start(&mut self) {
        self.calls.borrow_mut().push("terrain.start".to_string());
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push("terrain.stop".to_string());
    }

    fn cleanup(&mut self) {
        self.calls.borrow_mut().push("terrain.cleanup".to_string());
    }
}

impl TerrainShading for RecordingTerrainShader {
    fn load_clip_plane(&mut self, plane: Vec4) {
        self.calls.borrow_mut().push(format!(
            "terrain.clip_plane({}, {}, {}, {})",
            plane.x, plane.y, plane.z, plane.w
        ));
    }

    fn load_light(&mut self, _light: &Light) {
        self.calls.borrow_mut().push("terrain.light".to_string());
    }

    fn load_projection_view(&mut self, _matrix: Mat4) {
        self.calls
            .borrow_mut()
            .push("terrain.projection_view".to_string());
    }
}

pub struct RecordingWaterShader {
    pub calls: CallLog,
}

impl ShaderProgram for RecordingWaterShader {
    fn start(&mut self) {
        self.calls.borrow_mut().push("water.start".to_string());
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push("water.stop".to_string());
    }

    fn cleanup(&mut self) {
        self.calls.borrow_mut().push("water.cleanup".to_string());
    }
}

impl WaterShading for RecordingWaterShader {
    fn load_camera(&mut self, _projection_view: Mat4, position: Vec3, near_far: Vec2) {
        self.calls.borrow_mut().push(format!(
            "water.camera(pos: ({}, {}, {}), near_far: ({}, {}))",
            position.x, position.y, position.z, near_far.x, near_far.y
        ));
    }

    fn load_light(&mut self, _light: &Light) {
        self.calls.borrow_mut().push("water.light".to_string());
    }

    fn load_height(&mut self, height: f32) {
        self.calls
            .borrow_mut()
            .push(format!("water.height({})", height));
    }

    fn load_wave_time(&mut self, time: f32) {
        self.calls
            .borrow_mut()
            .push(format!("water.wave_time({})", time));
    }
}
