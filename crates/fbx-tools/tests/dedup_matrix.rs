//! Dedup behaviour on decoded scenes, checked through the binary encoder.

use fbx_binary::{decode, encode, Document, Long, Node, Property};
use fbx_tools::dedup::object_id;
use fbx_tools::{dedup_materials, dedup_objects, document_to_json, read_document, write_document};

fn long(id: i64) -> Property {
    Property::Long(Long::from_i64(id))
}

fn model(id: i64, name: &str) -> Node {
    Node::new("Model")
        .with_property(long(id))
        .with_property(Property::String(format!("{}\x00\x01Model", name).into_bytes()))
        .with_property(Property::string("Mesh"))
        .with_child(Node::new("Version").with_property(Property::Int(232)))
}

fn material(id: i64, diffuse: [f64; 3]) -> Node {
    Node::new("Material")
        .with_property(long(id))
        .with_property(Property::String(b"Paint\x00\x01Material".to_vec()))
        .with_property(Property::string(""))
        .with_child(Node::new("ShadingModel").with_property(Property::string("phong")))
        .with_child(
            Node::new("Properties70").with_child(
                Node::new("P")
                    .with_property(Property::string("DiffuseColor"))
                    .with_property(Property::string("Color"))
                    .with_property(Property::string(""))
                    .with_property(Property::string("A"))
                    .with_property(Property::Double(diffuse[0]))
                    .with_property(Property::Double(diffuse[1]))
                    .with_property(Property::Double(diffuse[2])),
            ),
        )
}

fn geometry(id: i64) -> Node {
    Node::new("Geometry")
        .with_property(long(id))
        .with_property(Property::String(b"\x00\x01Geometry".to_vec()))
        .with_property(Property::string("Mesh"))
        .with_child(
            Node::new("Vertices").with_property(Property::DoubleArray(vec![0.0, 1.0, 2.0])),
        )
}

fn oo(from: i64, to: i64) -> Node {
    Node::new("C")
        .with_property(Property::string("OO"))
        .with_property(long(from))
        .with_property(long(to))
}

fn op(from: i64, to: i64, prop: &str) -> Node {
    Node::new("C")
        .with_property(Property::string("OP"))
        .with_property(long(from))
        .with_property(long(to))
        .with_property(Property::string(prop))
}

fn object_ids(doc: &Document) -> Vec<i64> {
    doc.child("Objects")
        .map(|objects| {
            objects
                .children()
                .iter()
                .filter_map(object_id)
                .map(Long::to_i64)
                .collect()
        })
        .unwrap_or_default()
}

fn connections(doc: &Document) -> Vec<Node> {
    doc.child("Connections")
        .map(|c| c.children().to_vec())
        .unwrap_or_default()
}

/// Two cubes sharing a parent, each with its own geometry and its own copy of
/// the same red material, plus a blue sphere.
fn scene() -> Document {
    const RED: [f64; 3] = [0.8, 0.1, 0.1];
    const BLUE: [f64; 3] = [0.1, 0.1, 0.8];
    let mut doc = Document::new(7400);
    doc.children.push(
        Node::new("FBXHeaderExtension")
            .with_child(Node::new("FBXVersion").with_property(Property::Int(7400))),
    );
    doc.children.push(
        Node::new("Objects")
            .with_child(geometry(10))
            .with_child(geometry(11))
            .with_child(model(20, "Cube"))
            .with_child(model(21, "Cube"))
            .with_child(model(22, "Sphere"))
            .with_child(material(30, RED))
            .with_child(material(31, RED))
            .with_child(material(32, BLUE)),
    );
    doc.children.push(
        Node::new("Connections")
            .with_child(oo(20, 0))
            .with_child(oo(21, 0))
            .with_child(oo(22, 0))
            .with_child(oo(10, 20))
            .with_child(oo(11, 21))
            .with_child(oo(30, 20))
            .with_child(oo(31, 21))
            .with_child(oo(32, 22))
            .with_child(op(30, 20, "DiffuseColor"))
            .with_child(op(31, 21, "DiffuseColor")),
    );
    doc
}

#[test]
fn materials_merge_into_first_copy() {
    let mut doc = scene();
    let report = dedup_materials(&mut doc);
    assert_eq!(report.merged, vec![(Long::from_i64(31), Long::from_i64(30))]);
    assert_eq!(report.connections_removed, 0);
    assert_eq!(object_ids(&doc), vec![10, 11, 20, 21, 22, 30, 32]);
    assert!(connections(&doc).contains(&oo(30, 21)));
    assert!(!connections(&doc).contains(&oo(31, 21)));
}

#[test]
fn models_with_distinct_geometry_stay_apart() {
    let mut doc = scene();
    dedup_materials(&mut doc);
    let report = dedup_objects(&mut doc);
    // 20 and 21 each own a different geometry id.
    assert!(report.merged.is_empty());
    assert_eq!(object_ids(&doc), vec![10, 11, 20, 21, 22, 30, 32]);
}

#[test]
fn models_sharing_geometry_and_material_merge() {
    let mut doc = scene();
    // Point both cubes at the same geometry.
    let section = doc.child_mut("Connections").unwrap();
    let records = section.children.as_mut().unwrap();
    records[4] = oo(10, 21);

    let materials = dedup_materials(&mut doc);
    assert_eq!(materials.merged.len(), 1);
    let models = dedup_objects(&mut doc);
    assert_eq!(models.merged, vec![(Long::from_i64(21), Long::from_i64(20))]);
    // Every record of 21 collapses onto one of 20's.
    assert_eq!(models.connections_removed, 4);
    assert_eq!(object_ids(&doc), vec![10, 11, 20, 22, 30, 32]);
    assert_eq!(
        connections(&doc),
        vec![
            oo(20, 0),
            oo(22, 0),
            oo(10, 20),
            oo(30, 20),
            oo(32, 22),
            op(30, 20, "DiffuseColor"),
        ]
    );
}

#[test]
fn op_property_name_is_part_of_the_attachment() {
    let mut doc = Document::new(7400);
    doc.children.push(
        Node::new("Objects")
            .with_child(model(1, "A"))
            .with_child(model(2, "A")),
    );
    doc.children.push(
        Node::new("Connections")
            .with_child(op(9, 1, "DiffuseColor"))
            .with_child(op(9, 2, "Bump")),
    );
    assert!(dedup_objects(&mut doc).merged.is_empty());

    let records = doc.child_mut("Connections").unwrap().children.as_mut().unwrap();
    records[1] = op(9, 2, "DiffuseColor");
    let report = dedup_objects(&mut doc);
    assert_eq!(report.merged.len(), 1);
    assert_eq!(report.connections_removed, 1);
    assert_eq!(connections(&doc), vec![op(9, 1, "DiffuseColor")]);
}

#[test]
fn dedup_is_idempotent() {
    let mut doc = decode(&encode(&scene()).unwrap()).unwrap();
    let records = doc.child_mut("Connections").unwrap().children.as_mut().unwrap();
    records[4] = oo(10, 21);

    dedup_materials(&mut doc);
    dedup_objects(&mut doc);
    let first = encode(&doc).unwrap();

    let again_materials = dedup_materials(&mut doc);
    let again_objects = dedup_objects(&mut doc);
    assert!(again_materials.is_empty());
    assert!(again_objects.is_empty());
    let second = encode(&doc).unwrap();
    assert_eq!(first, second);

    // The deduplicated file decodes to the tree it was written from.
    assert_eq!(decode(&first).unwrap(), doc);
}

#[test]
fn scene_without_objects_is_untouched() {
    let mut doc = Document::new(7400);
    doc.children
        .push(Node::new("Connections").with_child(oo(1, 2)));
    let before = encode(&doc).unwrap();
    assert!(dedup_materials(&mut doc).is_empty());
    assert!(dedup_objects(&mut doc).is_empty());
    assert_eq!(encode(&doc).unwrap(), before);
}

#[test]
fn dedup_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.fbx");
    let output = dir.path().join("out.fbx");
    write_document(&input, &scene()).unwrap();

    let mut doc = read_document(&input, &fbx_binary::FbxDecoder::new()).unwrap();
    dedup_materials(&mut doc);
    write_document(&output, &doc).unwrap();

    let written = read_document(&output, &fbx_binary::FbxDecoder::new()).unwrap();
    assert_eq!(object_ids(&written), vec![10, 11, 20, 21, 22, 30, 32]);
    let json = document_to_json(&written);
    assert_eq!(json["children"][1]["name"], "Objects");
    assert_eq!(
        json["children"][1]["children"].as_array().map(Vec::len),
        Some(7)
    );
}
