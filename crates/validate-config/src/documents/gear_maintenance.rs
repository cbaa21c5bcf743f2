// Schema for gear-maintenance.yaml

use confcheck_validation::{ObjectSchema, Schema, SchemaResult};

pub(super) fn schema() -> SchemaResult<Schema> {
    let interval = ObjectSchema::builder()
        .closed(true)
        .required("value", Schema::int())
        // km, mi, hours, days, ...
        .required("unit", Schema::string())
        .build()?;

    let task = ObjectSchema::builder()
        .closed(true)
        .required("tag", Schema::string())
        .required("label", Schema::string())
        .required("interval", interval)
        .build()?;

    let component = ObjectSchema::builder()
        .closed(true)
        .required("tag", Schema::string())
        .required("label", Schema::string())
        .required("imgSrc", Schema::nullable(Schema::string()))
        .required("attachedTo", Schema::list_of(Schema::string()))
        .required("maintenance", Schema::list_of(task))
        .build()?;

    let gear_image = ObjectSchema::builder()
        .closed(true)
        .required("gearId", Schema::string())
        .required("imgSrc", Schema::nullable(Schema::string()))
        .build()?;

    ObjectSchema::builder()
        .closed(true)
        .required("enabled", Schema::boolean())
        .required("hashtagPrefix", Schema::string())
        .required("components", Schema::list_of(component))
        .required("gears", Schema::list_of(gear_image))
        .build()
}
