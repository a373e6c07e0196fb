/// Position and label of an entity on the world map.
///
/// A marker exists exactly as long as the entity it belongs to is tracked;
/// the registry rebuilds it whenever the entity changes and drops it together
/// with the entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}
