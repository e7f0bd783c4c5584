// Copyright @yucwang 2026

use macaron::core::error::RenderError;
use macaron::core::scene_loader::{load_scene_with_settings, parse_scene};
use macaron::core::sensor::Sensor;
use macaron::io::image_utils::write_image;
use macaron::renderers::simple::{Renderer, SimpleRenderer};

const SCENE: &str = r#"
<scene>
    <integrator type="$integrator"/>
    <sampler type="independent">
        <integer name="sampleCount" value="4"/>
        <integer name="seed" value="11"/>
    </sampler>
    <camera type="perspective">
        <point name="origin" value="0, 1, 6"/>
        <point name="target" value="0, 0, 0"/>
        <vector name="up" value="0, 1, 0"/>
        <float name="fov" value="35"/>
        <integer name="width" value="16"/>
        <integer name="height" value="12"/>
    </camera>
    <medium type="homogeneous">
        <color name="sigmaT" value="0.05"/>
        <color name="albedo" value="0.9"/>
    </medium>
    <shape type="rectangle">
        <point name="center" value="0, -1, 0"/>
        <vector name="u" value="0, 0, 4"/>
        <vector name="v" value="4, 0, 0"/>
        <bsdf type="diffuse">
            <color name="albedo" value="0.6, 0.6, 0.6"/>
        </bsdf>
    </shape>
    <shape type="sphere">
        <point name="center" value="0, 0, 0"/>
        <float name="radius" value="1"/>
        <bsdf type="phong">
            <color name="kd" value="0.5, 0.2, 0.2"/>
            <color name="ks" value="0.3"/>
            <float name="n" value="25"/>
        </bsdf>
    </shape>
    <shape type="rectangle">
        <point name="center" value="0, 3, 0"/>
        <vector name="u" value="1, 0, 0"/>
        <vector name="v" value="0, 0, 1"/>
        <emitter type="area">
            <color name="radiance" value="6"/>
        </emitter>
    </shape>
</scene>
"#;

fn scene_with(integrator: &str) -> String {
    SCENE.replace("$integrator", integrator)
}

#[test]
fn scene_file_renders_with_every_integrator() {
    for integrator in ["path", "direct", "depth"].iter() {
        let loaded = parse_scene(&scene_with(integrator)).unwrap();
        assert_eq!(loaded.samples_per_pixel, 4);
        let image = SimpleRenderer::new(loaded.integrator, loaded.samples_per_pixel, loaded.seed)
            .with_progress(false)
            .render(&loaded.scene, &loaded.camera)
            .unwrap();
        assert_eq!(image.width(), loaded.camera.width());
        let mean = image.mean();
        assert!(mean.x.is_finite() && mean.x > 0.0, "{} gave mean {:?}", integrator, mean);
    }
}

#[test]
fn scene_file_round_trip_through_disk() {
    let dir = std::env::temp_dir().join(format!("macaron_scene_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let scene_path = dir.join("scene.xml");
    std::fs::write(&scene_path, scene_with("path")).unwrap();

    let loaded = load_scene_with_settings(&scene_path).unwrap();
    let image = SimpleRenderer::new(loaded.integrator, 1, loaded.seed)
        .with_progress(false)
        .render(&loaded.scene, &loaded.camera)
        .unwrap();
    let png = dir.join("scene.png");
    write_image(&image, &png).unwrap();
    assert!(png.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_scene_file_is_an_io_error() {
    let result = load_scene_with_settings("/nonexistent/macaron/scene.xml");
    assert!(matches!(result, Err(RenderError::Io(_))));
}

#[test]
fn unknown_integrator_is_rejected() {
    assert!(matches!(parse_scene(&scene_with("bidirectional")), Err(RenderError::SceneParse(_))));
}
