// Schema for custom-gear.yaml

use confcheck_validation::{ObjectSchema, Schema, SchemaResult};

pub(super) fn schema() -> SchemaResult<Schema> {
    let entry = ObjectSchema::builder()
        .closed(true)
        .required("tag", Schema::string())
        .required("label", Schema::string())
        .required("isRetired", Schema::boolean())
        .build()?;

    ObjectSchema::builder()
        .closed(true)
        .required("enabled", Schema::boolean())
        .required("hashtagPrefix", Schema::string())
        .required("customGears", Schema::list_of(entry))
        .gated_by("enabled", ["hashtagPrefix", "customGears"])
        .build()
}
