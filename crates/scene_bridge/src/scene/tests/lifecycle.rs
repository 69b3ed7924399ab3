use approx::assert_relative_eq;

use super::{manager, name_of, parent_of, MESH_URI};
use crate::core::{BridgeConfig, DefaultMaterialConfig, DEFAULT_MATERIAL_NAME};
use crate::description::{
    Geometry, Light, LightType, Link, Material, Model, Pbr, PbrWorkflow, SpotCone, Visual,
};
use crate::foundation::math::{Color, Pose, Vec2, Vec3};
use crate::render::memory::{GeometryShape, NodeKind};
use crate::render::{LightKind, MemoryScene, Primitive, RenderScene};
use crate::scene::{EntityKind, EntityRole, SceneError, SceneManager, SceneNode};

#[test]
fn test_model_at_world_hangs_off_root() {
    let mut bridge = manager();
    let pose = Pose::from_xyz_rpy(1.0, 2.0, 3.0, 0.0, 0.0, 0.5);
    let node = bridge.create_model(1, &Model::new("car").with_pose(pose), 0).unwrap();

    assert_eq!(name_of(&bridge, node), "car");
    assert_eq!(parent_of(&bridge, node), Some(bridge.scene().root_visual()));
    assert_eq!(bridge.scene().node(node).unwrap().pose, pose);
    assert_eq!(bridge.visual(1), Some(&node));
}

#[test]
fn test_children_are_scoped_by_parent_name() {
    let mut bridge = manager();
    let car = bridge.create_model(1, &Model::new("car"), 0).unwrap();
    let chassis = bridge.create_link(2, &Link::new("chassis"), 1).unwrap();
    let anonymous = bridge.create_link(11, &Link::new(""), 1).unwrap();
    let wheel = bridge
        .create_visual(3, &Visual::new("wheel", Geometry::cylinder(0.3, 0.2)), 2)
        .unwrap();

    assert_eq!(name_of(&bridge, chassis), "car::chassis");
    assert_eq!(name_of(&bridge, anonymous), "car::11");
    assert_eq!(name_of(&bridge, wheel), "car::chassis::wheel");
    assert_eq!(parent_of(&bridge, chassis), Some(car));
    assert_eq!(parent_of(&bridge, wheel), Some(chassis));
}

#[test]
fn test_links_at_world_attach_to_root() {
    let mut bridge = manager();
    let link = bridge.create_link(5, &Link::new("base"), 0).unwrap();
    assert_eq!(parent_of(&bridge, link), Some(bridge.scene().root_visual()));
}

#[test]
fn test_duplicate_id_keeps_first_registration() {
    let mut bridge = manager();
    let first = bridge.create_model(1, &Model::new("first"), 0).unwrap();
    let nodes = bridge.scene().node_count();

    let err = bridge.create_visual(1, &Visual::new("second", Geometry::sphere(1.0)), 0);
    assert_eq!(
        err,
        Err(SceneError::DuplicateId {
            id: 1,
            kind: EntityKind::Visual
        })
    );
    assert_eq!(bridge.visual(1), Some(&first));
    assert_eq!(bridge.scene().node_count(), nodes);
}

#[test]
fn test_unknown_parent_commits_nothing() {
    let mut bridge = manager();
    let nodes = bridge.scene().node_count();

    let err = bridge.create_link(2, &Link::new("orphan"), 99).unwrap_err();
    assert_eq!(
        err,
        SceneError::UnknownParent {
            id: 2,
            parent: 99,
            role: EntityRole::Link
        }
    );
    assert!(!bridge.has_entity(2));
    assert_eq!(bridge.scene().node_count(), nodes);
}

#[test]
fn test_light_cannot_parent_a_visual() {
    let mut bridge = manager();
    bridge.create_light(4, &Light::point("lamp"), 0).unwrap();
    let err = bridge.create_visual(5, &Visual::new("shade", Geometry::sphere(0.1)), 4);
    assert!(matches!(err, Err(SceneError::UnknownParent { parent: 4, .. })));
}

#[test]
fn test_configured_world_id() {
    let config = BridgeConfig::new().with_world_id(1000);
    let mut bridge = SceneManager::with_config(MemoryScene::new(), &config);
    assert_eq!(bridge.world_id(), 1000);

    let node = bridge.create_model(1, &Model::new("m"), 1000).unwrap();
    assert_eq!(parent_of(&bridge, node), Some(bridge.scene().root_visual()));
    assert!(bridge.create_model(2, &Model::new("n"), 0).is_err());

    bridge.set_world_id(0);
    assert!(bridge.create_model(2, &Model::new("n"), 0).is_ok());
}

#[test]
fn test_primitive_scale_lands_on_visual() {
    let mut bridge = manager();
    let cylinder = bridge
        .create_visual(1, &Visual::new("pipe", Geometry::cylinder(2.0, 5.0)), 0)
        .unwrap();
    let sphere = bridge.create_visual(2, &Visual::new("ball", Geometry::sphere(1.0)), 0).unwrap();
    let cube = bridge
        .create_visual(3, &Visual::new("crate", Geometry::cuboid(1.0, 2.0, 3.0)), 0)
        .unwrap();

    let scene = bridge.scene();
    assert_eq!(scene.node(cylinder).unwrap().scale, Vec3::new(4.0, 4.0, 5.0));
    assert_eq!(scene.node(sphere).unwrap().scale, Vec3::new(2.0, 2.0, 2.0));
    assert_eq!(scene.node(cube).unwrap().scale, Vec3::new(1.0, 2.0, 3.0));

    let geometries = &scene.node(cube).unwrap().geometries;
    assert_eq!(geometries.len(), 1);
    assert_eq!(geometries[0].shape, GeometryShape::Primitive(Primitive::Box));
    assert!(scene.node(cube).unwrap().children.is_empty());
}

#[test]
fn test_tilted_plane_gets_corrective_node() {
    let mut bridge = manager();
    let wall = bridge
        .create_visual(1, &Visual::new("wall", Geometry::plane(Vec2::new(4.0, 3.0), Vec3::x())), 0)
        .unwrap();

    let scene = bridge.scene();
    let wall_data = scene.node(wall).unwrap();
    assert!(wall_data.geometries.is_empty());
    assert_eq!(wall_data.children.len(), 1);

    let carrier = scene.node(wall_data.children[0]).unwrap();
    assert_eq!(carrier.name, "wall_geom");
    assert_eq!(carrier.scale, Vec3::new(4.0, 3.0, 1.0));
    assert_relative_eq!(carrier.pose.rotation * Vec3::z(), Vec3::x(), epsilon = 1e-9);
    assert_eq!(carrier.geometries[0].shape, GeometryShape::Primitive(Primitive::Plane));

    // The corrective node is not an entity
    assert_eq!(bridge.entities().len(EntityKind::Visual), 1);
}

#[test]
fn test_floor_plane_needs_no_corrective_node() {
    let mut bridge = manager();
    let floor = bridge
        .create_visual(1, &Visual::new("floor", Geometry::plane(Vec2::new(10.0, 10.0), Vec3::z())), 0)
        .unwrap();

    let data = bridge.scene().node(floor).unwrap();
    assert!(data.children.is_empty());
    assert_eq!(data.scale, Vec3::new(10.0, 10.0, 1.0));
    assert_eq!(data.geometries.len(), 1);
}

#[test]
fn test_default_material_created_once_and_shared() {
    let mut bridge = manager();
    let a = bridge.create_visual(1, &Visual::new("a", Geometry::sphere(1.0)), 0).unwrap();
    let b = bridge.create_visual(2, &Visual::new("b", Geometry::cuboid(1.0, 1.0, 1.0)), 0).unwrap();

    let scene = bridge.scene();
    let material_a = scene.node(a).unwrap().geometries[0].material;
    let material_b = scene.node(b).unwrap().geometries[0].material;
    assert!(material_a.is_some());
    assert_eq!(material_a, material_b);
    assert_eq!(scene.material(DEFAULT_MATERIAL_NAME), material_a);
    assert_eq!(scene.stats().materials_created, 1);

    let params = &scene.material_data(material_a.unwrap()).unwrap().params;
    assert_eq!(params.diffuse, Color::gray(0.7));
    assert_eq!(params.roughness, Some(0.2));
    assert_eq!(params.metalness, Some(1.0));
}

#[test]
fn test_default_material_name_is_configurable() {
    let material = DefaultMaterialConfig {
        name: "fallback".to_string(),
        ..DefaultMaterialConfig::default()
    };
    let config = BridgeConfig::new().with_default_material(material);
    let mut bridge = SceneManager::with_config(MemoryScene::new(), &config);
    bridge.create_visual(1, &Visual::new("a", Geometry::sphere(1.0)), 0).unwrap();

    assert!(bridge.scene().material("fallback").is_some());
    assert!(bridge.scene().material(DEFAULT_MATERIAL_NAME).is_none());
}

#[test]
fn test_explicit_material_is_anonymous() {
    let mut bridge = manager();
    let workflow = PbrWorkflow {
        albedo_map: "textures/paint.png".to_string(),
        normal_map: "missing/normal.png".to_string(),
        ..PbrWorkflow::metal(0.4, 0.1)
    };
    let material = Material::diffuse(Color::rgb(0.0, 0.0, 1.0)).with_pbr(Pbr::single(workflow));
    let visual = Visual::new("door", Geometry::cuboid(1.0, 0.1, 2.0)).with_material(material);
    let node = bridge.create_visual(1, &visual, 0).unwrap();

    let scene = bridge.scene();
    let key = scene.node(node).unwrap().geometries[0].material.unwrap();
    let data = scene.material_data(key).unwrap();
    assert_eq!(data.name, None);
    assert_eq!(data.params.diffuse, Color::rgb(0.0, 0.0, 1.0));
    assert_eq!(data.params.roughness, Some(0.4));
    assert_eq!(
        data.params.texture.as_deref(),
        Some(std::path::Path::new("/assets/textures/paint.png"))
    );
    assert_eq!(data.params.normal_map, None);
    assert!(scene.material(DEFAULT_MATERIAL_NAME).is_none());
}

#[test]
fn test_mesh_keeps_embedded_material() {
    let mut bridge = manager();
    let mut geometry = Geometry::mesh(MESH_URI);
    if let Geometry::Mesh(shape) = &mut geometry {
        shape.scale = Vec3::new(2.0, 2.0, 2.0);
    }
    let node = bridge.create_visual(1, &Visual::new("wedge", geometry), 0).unwrap();

    let scene = bridge.scene();
    let data = scene.node(node).unwrap();
    assert_eq!(data.scale, Vec3::new(2.0, 2.0, 2.0));
    assert!(matches!(&data.geometries[0].shape, GeometryShape::Mesh { name, triangles: 1, .. } if name == MESH_URI));

    let key = data.geometries[0].material.unwrap();
    assert_eq!(scene.material_data(key).unwrap().params.diffuse, Color::rgb(1.0, 0.0, 0.0));
    assert!(scene.material(DEFAULT_MATERIAL_NAME).is_none());
}

#[test]
fn test_unrenderable_geometry_still_creates_visual() {
    let mut bridge = manager();
    let capsule = Geometry::Capsule {
        radius: 0.5,
        length: 1.0,
    };
    let node = bridge.create_visual(1, &Visual::new("pill", capsule), 0).unwrap();
    let missing_mesh = bridge
        .create_visual(2, &Visual::new("ghost", Geometry::mesh("meshes/none.obj")), 0)
        .unwrap();
    let empty_uri = bridge.create_visual(3, &Visual::new("blank", Geometry::mesh("")), 0).unwrap();

    for node in [node, missing_mesh, empty_uri] {
        assert!(bridge.scene().node(node).unwrap().geometries.is_empty());
    }
    assert!(bridge.has_entity(1) && bridge.has_entity(2) && bridge.has_entity(3));
}

#[test]
fn test_visual_without_geometry_is_rejected() {
    let mut bridge = manager();
    let nodes = bridge.scene().node_count();
    let visual = Visual {
        name: "nothing".to_string(),
        ..Visual::default()
    };

    assert_eq!(bridge.create_visual(1, &visual, 0), Err(SceneError::MissingGeometry(1)));
    assert!(!bridge.has_entity(1));
    assert_eq!(bridge.scene().node_count(), nodes);
}

#[test]
fn test_light_kinds_and_properties() {
    let mut bridge = manager();
    let mut point = Light::point("bulb");
    point.diffuse = Color::rgb(1.0, 0.9, 0.8);
    point.attenuation.range = 25.0;
    point.cast_shadows = true;
    let spot = Light::spot(
        "torch",
        SpotCone {
            inner_angle: 0.2,
            outer_angle: 0.5,
            falloff: 1.0,
        },
    );
    let sun = Light::directional("sun", Vec3::new(0.0, 0.0, -1.0));

    let point_node = bridge.create_light(1, &point, 0).unwrap();
    let spot_node = bridge.create_light(2, &spot, 0).unwrap();
    let sun_node = bridge.create_light(3, &sun, 0).unwrap();

    let scene = bridge.scene();
    let NodeKind::Light(LightKind::Point, Some(props)) = scene.node(point_node).unwrap().kind else {
        panic!("point light not configured");
    };
    assert_eq!(props.diffuse, Color::rgb(1.0, 0.9, 0.8));
    assert_eq!(props.attenuation_range, 25.0);
    assert!(props.cast_shadows);

    assert!(matches!(
        scene.node(spot_node).unwrap().kind,
        NodeKind::Light(LightKind::Spot { inner_angle, outer_angle, .. }, Some(_))
            if inner_angle == 0.2 && outer_angle == 0.5
    ));
    assert!(matches!(
        scene.node(sun_node).unwrap().kind,
        NodeKind::Light(LightKind::Directional { direction }, Some(_)) if direction == Vec3::new(0.0, 0.0, -1.0)
    ));
    assert_eq!(bridge.entities().len(EntityKind::Light), 3);
}

#[test]
fn test_invalid_light_creates_nothing() {
    let mut bridge = manager();
    let nodes = bridge.scene().node_count();
    let err = bridge.create_light(1, &Light::new("void", LightType::Invalid), 0);

    assert_eq!(err, Err(SceneError::UnsupportedLightType(LightType::Invalid)));
    assert!(!bridge.has_entity(1));
    assert_eq!(bridge.scene().node_count(), nodes);
}

#[test]
fn test_light_under_link() {
    let mut bridge = manager();
    bridge.create_model(1, &Model::new("car"), 0).unwrap();
    let lamp = bridge.create_light(2, &Light::point("headlight"), 1).unwrap();
    assert_eq!(name_of(&bridge, lamp), "car::headlight");
    assert_eq!(bridge.node_by_id(2), Some(SceneNode::Light(lamp)));
}

#[test]
fn test_removing_model_unregisters_its_subtree() {
    let mut bridge = manager();
    let camera = bridge.scene_mut().register_sensor(500, "camera");
    bridge.create_model(1, &Model::new("car"), 0).unwrap();
    let chassis = bridge.create_link(2, &Link::new("chassis"), 1).unwrap();
    bridge.create_light(3, &Light::point("headlight"), 2).unwrap();
    bridge.attach_sensor(4, 500, 2).unwrap();
    let garage = bridge.create_model(5, &Model::new("garage"), 0).unwrap();

    assert_eq!(bridge.remove_entity(1), Some(EntityKind::Visual));
    assert!(!bridge.scene().contains(chassis));
    assert!(!bridge.has_entity(2));
    assert!(!bridge.has_entity(3));
    assert_eq!(bridge.node_by_id(2), None);

    // Sensors survive their parent and stay registered
    assert!(bridge.scene().contains(camera));
    assert!(bridge.has_entity(4));
    assert_eq!(bridge.visual(5), Some(&garage));

    let nodes = bridge.scene().node_count();
    let err = bridge.create_visual(6, &Visual::new("body", Geometry::cuboid(1.0, 1.0, 1.0)), 2);
    assert_eq!(
        err,
        Err(SceneError::UnknownParent {
            id: 6,
            parent: 2,
            role: EntityRole::Visual
        })
    );
    assert_eq!(bridge.scene().node_count(), nodes);

    // The freed ids can be reused under a live parent
    let chassis = bridge.create_link(2, &Link::new("chassis"), 5).unwrap();
    assert_eq!(name_of(&bridge, chassis), "garage::chassis");
    assert_eq!(parent_of(&bridge, chassis), Some(garage));
}

#[test]
fn test_remove_visual_and_light() {
    let mut bridge = manager();
    let model = bridge.create_model(1, &Model::new("car"), 0).unwrap();
    let lamp = bridge.create_light(2, &Light::point("lamp"), 0).unwrap();
    assert!(bridge.has_entity(1));

    assert_eq!(bridge.remove_entity(1), Some(EntityKind::Visual));
    assert_eq!(bridge.remove_entity(2), Some(EntityKind::Light));
    assert_eq!(bridge.remove_entity(1), None);

    assert!(!bridge.has_entity(1));
    assert!(!bridge.has_entity(2));
    assert!(!bridge.scene().contains(model));
    assert!(!bridge.scene().contains(lamp));
    assert_eq!(bridge.scene().stats().visuals_destroyed, 1);
    assert_eq!(bridge.scene().stats().lights_destroyed, 1);
}

#[test]
fn test_visual_table_wins_on_shared_id() {
    let mut bridge = manager();
    let visual = bridge.create_model(7, &Model::new("m"), 0).unwrap();
    let light = bridge.create_light(7, &Light::point("l"), 0).unwrap();

    assert_eq!(bridge.node_by_id(7), Some(SceneNode::Visual(visual)));
    assert_eq!(bridge.remove_entity(7), Some(EntityKind::Visual));
    assert_eq!(bridge.node_by_id(7), Some(SceneNode::Light(light)));
    assert_eq!(bridge.remove_entity(7), Some(EntityKind::Light));
    assert!(!bridge.has_entity(7));
}

#[test]
fn test_set_scene_drops_registrations() {
    let mut bridge = manager();
    bridge.create_model(1, &Model::new("car"), 0).unwrap();

    let old = bridge.set_scene(MemoryScene::new());
    assert!(old.find_by_name("car").is_some());
    assert!(bridge.entities().is_empty());
    assert!(!bridge.has_entity(1));
    assert!(bridge.create_model(1, &Model::new("car"), 0).is_ok());
}
