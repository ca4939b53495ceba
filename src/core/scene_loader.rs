// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::scene::{DirectionalLight, Material, PointLight, Scene, Sphere};
use crate::math::constants::{Float, Vector3f};
use crate::renderers::renderer::RenderSettings;
use crate::sensors::pinhole::PinholeCamera;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IntegratorKind {
    Path,
    Direct,
}

pub struct SceneLoadResult {
    pub scene: Scene,
    pub camera: Option<PinholeCamera>,
    pub settings: RenderSettings,
    pub frames: u32,
    pub integrator: IntegratorKind,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneLoadError> {
    let result = load_scene_with_settings(path)?;
    Ok(result.scene)
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let xml = fs::read_to_string(path)?;
    parse_scene(&xml)
}

fn parse_scene(xml: &str) -> Result<SceneLoadResult, SceneLoadError> {
    let mut reader = Reader::from_str(xml);

    let mut scene = Scene::new();
    let mut material_ids: HashMap<String, usize> = HashMap::new();

    let mut camera_origin: Option<Vector3f> = None;
    let mut camera_target: Option<Vector3f> = None;
    let mut camera_up = Vector3f::new(0.0, 1.0, 0.0);
    let mut camera_fov_deg: Float = 45.0;
    let mut film_width: usize = 640;
    let mut film_height: usize = 480;

    let mut settings = RenderSettings::default();
    let mut frames: u32 = 1;
    let mut integrator = IntegratorKind::Path;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let attrs = attribute_map(&e)?;
                match e.name().as_ref() {
                    b"skylight" => {
                        if let Some(value) = attrs.get("color") {
                            scene.sky_light.color = parse_vec3(value, "skylight color")?;
                        }
                        if let Some(value) = attrs.get("strength") {
                            scene.sky_light.strength = parse_float(value, "skylight strength")?;
                        }
                    }
                    b"material" => {
                        let id = attrs
                            .get("id")
                            .ok_or(SceneLoadError::MissingField("material id"))?;
                        let albedo = parse_vec3(
                            attrs
                                .get("albedo")
                                .ok_or(SceneLoadError::MissingField("material albedo"))?,
                            "material albedo",
                        )?;

                        let mut material = Material::new(albedo);
                        if let Some(value) = attrs.get("emission") {
                            material.emission_color = parse_vec3(value, "material emission")?;
                        }
                        if let Some(value) = attrs.get("emission_strength") {
                            material.emission_strength =
                                parse_float(value, "material emission_strength")?;
                        }
                        if let Some(value) = attrs.get("shininess") {
                            material.shininess = parse_float(value, "material shininess")?;
                        }

                        let index = scene.add_material(material);
                        material_ids.insert(id.clone(), index);
                    }
                    b"sphere" => {
                        let center = parse_vec3(
                            attrs
                                .get("center")
                                .ok_or(SceneLoadError::MissingField("sphere center"))?,
                            "sphere center",
                        )?;
                        let radius = parse_float(
                            attrs
                                .get("radius")
                                .ok_or(SceneLoadError::MissingField("sphere radius"))?,
                            "sphere radius",
                        )?;

                        let material_index = match attrs.get("material") {
                            Some(id) => match material_ids.get(id) {
                                Some(index) => *index,
                                None => {
                                    log::warn!(
                                        "sphere references unknown material '{}', using the fallback",
                                        id
                                    );
                                    0
                                }
                            },
                            None => 0,
                        };
                        scene.add_sphere(Sphere::new(center, radius, material_index));
                    }
                    b"directionallight" => {
                        let direction = parse_vec3(
                            attrs
                                .get("direction")
                                .ok_or(SceneLoadError::MissingField("directionallight direction"))?,
                            "directionallight direction",
                        )?;
                        let color = match attrs.get("color") {
                            Some(value) => parse_vec3(value, "directionallight color")?,
                            None => Vector3f::new(1.0, 1.0, 1.0),
                        };
                        let intensity = match attrs.get("intensity") {
                            Some(value) => parse_float(value, "directionallight intensity")?,
                            None => 1.0,
                        };
                        scene
                            .directional_lights
                            .push(DirectionalLight::new(direction, color, intensity));
                    }
                    b"pointlight" => {
                        let position = parse_vec3(
                            attrs
                                .get("position")
                                .ok_or(SceneLoadError::MissingField("pointlight position"))?,
                            "pointlight position",
                        )?;
                        let color = match attrs.get("color") {
                            Some(value) => parse_vec3(value, "pointlight color")?,
                            None => Vector3f::new(1.0, 1.0, 1.0),
                        };
                        let intensity = match attrs.get("intensity") {
                            Some(value) => parse_float(value, "pointlight intensity")?,
                            None => 1.0,
                        };
                        scene
                            .point_lights
                            .push(PointLight::new(position, color, intensity));
                    }
                    b"camera" => {
                        camera_origin = Some(parse_vec3(
                            attrs
                                .get("origin")
                                .ok_or(SceneLoadError::MissingField("camera origin"))?,
                            "camera origin",
                        )?);
                        camera_target = Some(parse_vec3(
                            attrs
                                .get("target")
                                .ok_or(SceneLoadError::MissingField("camera target"))?,
                            "camera target",
                        )?);
                        if let Some(value) = attrs.get("up") {
                            camera_up = parse_vec3(value, "camera up")?;
                        }
                        if let Some(value) = attrs.get("fov") {
                            camera_fov_deg = parse_float(value, "camera fov")?;
                        }
                    }
                    b"film" => {
                        if let Some(value) = attrs.get("width") {
                            film_width = parse_u32(value, "film width")? as usize;
                        }
                        if let Some(value) = attrs.get("height") {
                            film_height = parse_u32(value, "film height")? as usize;
                        }
                    }
                    b"settings" => {
                        if let Some(value) = attrs.get("frames") {
                            frames = parse_u32(value, "settings frames")?;
                        }
                        if let Some(value) = attrs.get("bounces") {
                            settings.bounce_limit = parse_u32(value, "settings bounces")?;
                        }
                        if let Some(value) = attrs.get("exposure") {
                            settings.exposure = parse_float(value, "settings exposure")?;
                        }
                        if let Some(value) = attrs.get("gamma") {
                            settings.gamma = parse_float(value, "settings gamma")?;
                        }
                        if let Some(value) = attrs.get("tonemap") {
                            settings.tone_mapping = parse_bool(value, "settings tonemap")?;
                        }
                        if let Some(value) = attrs.get("gamma_correction") {
                            settings.gamma_correction =
                                parse_bool(value, "settings gamma_correction")?;
                        }
                        if let Some(value) = attrs.get("accumulate") {
                            settings.accumulate = parse_bool(value, "settings accumulate")?;
                        }
                        if let Some(value) = attrs.get("integrator") {
                            integrator = match value.as_str() {
                                "path" => IntegratorKind::Path,
                                "direct" => IntegratorKind::Direct,
                                other => {
                                    return Err(SceneLoadError::Parse(format!(
                                        "unknown integrator: {}",
                                        other
                                    )))
                                }
                            };
                        }
                    }
                    // Unknown elements are ignored so scene files can carry
                    // annotations.
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(SceneLoadError::Parse(err.to_string())),
        }
    }

    let camera = match (camera_origin, camera_target) {
        (Some(origin), Some(target)) => Some(PinholeCamera::new(
            origin,
            target,
            camera_up,
            camera_fov_deg.to_radians(),
            film_width,
            film_height,
        )),
        _ => None,
    };

    log::info!(
        "scene loaded: {} spheres, {} materials, {} directional lights, {} point lights",
        scene.spheres.len(),
        scene.materials.len(),
        scene.directional_lights.len(),
        scene.point_lights.len()
    );

    Ok(SceneLoadResult {
        scene,
        camera,
        settings,
        frames,
        integrator,
    })
}

fn attribute_map(e: &BytesStart) -> Result<HashMap<String, String>, SceneLoadError> {
    let mut map = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| SceneLoadError::Parse(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| SceneLoadError::Parse(err.to_string()))?
            .to_string();
        map.insert(key, value);
    }
    Ok(map)
}

fn parse_float(value: &str, field: &str) -> Result<Float, SceneLoadError> {
    value
        .trim()
        .parse::<Float>()
        .map_err(|_| SceneLoadError::Parse(format!("bad float in {}: {}", field, value)))
}

fn parse_u32(value: &str, field: &str) -> Result<u32, SceneLoadError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| SceneLoadError::Parse(format!("bad integer in {}: {}", field, value)))
}

fn parse_bool(value: &str, field: &str) -> Result<bool, SceneLoadError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(SceneLoadError::Parse(format!(
            "bad boolean in {}: {}",
            field, other
        ))),
    }
}

fn parse_vec3(value: &str, field: &str) -> Result<Vector3f, SceneLoadError> {
    let components: Vec<Float> = value
        .split_whitespace()
        .map(|part| parse_float(part, field))
        .collect::<Result<_, _>>()?;
    if components.len() != 3 {
        return Err(SceneLoadError::Parse(format!(
            "expected three components in {}: {}",
            field, value
        )));
    }
    Ok(Vector3f::new(components[0], components[1], components[2]))
}

/* Tests for the scene loader */

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE_XML: &str = r#"
<scene>
    <skylight color="0.6 0.7 0.9" strength="0.5"/>
    <material id="blue" albedo="0 0 1"/>
    <material id="lamp" albedo="0 0 0" emission="1 0.9 0.8" emission_strength="4"/>
    <sphere center="0 0 0" radius="0.5" material="blue"/>
    <sphere center="-1 0 0" radius="0.5" material="lamp"/>
    <directionallight direction="-1 -1 -1" intensity="1"/>
    <pointlight position="0 2 0" color="1 1 1" intensity="3"/>
    <camera origin="0 0 3" target="0 0 0" fov="60"/>
    <film width="8" height="6"/>
    <settings frames="16" bounces="3" tonemap="false" integrator="path"/>
</scene>
"#;

    #[test]
    fn test_parse_full_scene() {
        let result = parse_scene(SCENE_XML).expect("failed to parse scene");
        let scene = &result.scene;

        // Fallback plus the two declared materials.
        assert_eq!(scene.materials.len(), 3);
        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.spheres[0].material_index, 1);
        assert_eq!(scene.spheres[1].material_index, 2);
        assert_eq!(scene.directional_lights.len(), 1);
        assert_eq!(scene.point_lights.len(), 1);
        assert!((scene.sky_light.strength - 0.5).abs() < 1e-6);
        assert!((scene.materials[2].emission_strength - 4.0).abs() < 1e-6);

        let camera = result.camera.expect("expected a camera");
        assert_eq!(camera.width(), 8);
        assert_eq!(camera.height(), 6);

        assert_eq!(result.frames, 16);
        assert_eq!(result.settings.bounce_limit, 3);
        assert!(!result.settings.tone_mapping);
        assert!(result.settings.gamma_correction);
        assert_eq!(result.integrator, IntegratorKind::Path);
    }

    #[test]
    fn test_unknown_material_falls_back() {
        let xml = r#"<scene><sphere center="0 0 0" radius="1" material="nope"/></scene>"#;
        let result = parse_scene(xml).expect("failed to parse scene");
        assert_eq!(result.scene.spheres[0].material_index, 0);
        assert!(result.camera.is_none());
    }

    #[test]
    fn test_material_without_id_is_rejected() {
        let xml = r#"<scene><material albedo="1 0 0"/></scene>"#;
        assert!(matches!(
            parse_scene(xml),
            Err(SceneLoadError::MissingField("material id"))
        ));
    }

    #[test]
    fn test_malformed_vector_is_rejected() {
        let xml = r#"<scene><skylight color="0.6 0.7"/></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Parse(_))));
    }

    #[test]
    fn test_unknown_integrator_is_rejected() {
        let xml = r#"<scene><settings integrator="bidirectional"/></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Parse(_))));
    }
}
