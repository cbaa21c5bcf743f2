// Schema for config.yaml

use confcheck_validation::{ObjectSchema, Schema, SchemaResult};

const LOCALES: [&str; 8] = [
    "en_US", "fr_FR", "it_IT", "nl_BE", "de_DE", "pt_BR", "pt_PT", "zh_CN",
];
const VISIBILITIES: [&str; 3] = ["everyone", "followers_only", "only_me"];
const AI_PROVIDERS: [&str; 6] = ["anthropic", "gemini", "ollama", "openAI", "deepseek", "mistral"];

/// Nullable fields below must still be written out, even if only as `null`.
pub(super) fn schema() -> SchemaResult<Schema> {
    ObjectSchema::builder()
        .closed(true)
        .required("general", general()?)
        .required("appearance", appearance()?)
        .required("import", import()?)
        .required("metrics", metrics()?)
        .required("zwift", zwift()?)
        .required("integrations", integrations()?)
        .build()
}

fn general() -> SchemaResult<Schema> {
    ObjectSchema::builder()
        .closed(true)
        .required("appUrl", Schema::string_matching(r"^https?://\S+$")?)
        .required("appSubTitle", Schema::nullable(Schema::string()))
        .required("profilePictureUrl", Schema::nullable(Schema::string()))
        .required("ntfyUrl", Schema::nullable(Schema::string()))
        .required("athlete", athlete()?)
        .build()
}

fn athlete() -> SchemaResult<Schema> {
    ObjectSchema::builder()
        .closed(true)
        .required("birthday", Schema::string())
        .required(
            "maxHeartRateFormula",
            Schema::any_of(vec![Schema::string(), Schema::map_of(Schema::int())])?,
        )
        .required("heartRateZones", heart_rate_zones()?)
        .required(
            "weightHistory",
            Schema::map_of(Schema::any_of(vec![Schema::int(), Schema::float()])?),
        )
        .required("ftpHistory", Schema::list_of(Schema::int()))
        .build()
}

fn heart_rate_zones() -> SchemaResult<Schema> {
    let zone = ObjectSchema::builder()
        .closed(true)
        .required("from", Schema::int())
        .required("to", Schema::nullable(Schema::int()))
        .build()?;

    ObjectSchema::builder()
        .closed(true)
        .required("mode", Schema::enumeration(["relative", "absolute"])?)
        .required("default", Schema::map_of(zone))
        .build()
}

fn appearance() -> SchemaResult<Schema> {
    let date_format = ObjectSchema::builder()
        .closed(true)
        .required("short", Schema::string())
        .required("normal", Schema::string())
        .build()?;

    ObjectSchema::builder()
        .closed(true)
        .required("locale", Schema::enumeration(LOCALES)?)
        .required("unitSystem", Schema::enumeration(["metric", "imperial"])?)
        .required("timeFormat", Schema::enumeration([12, 24])?)
        .required("dateFormat", date_format)
        .required("sportTypesSortingOrder", Schema::list_of(Schema::string()))
        .build()
}

fn import() -> SchemaResult<Schema> {
    ObjectSchema::builder()
        .closed(true)
        .required("numberOfNewActivitiesToProcessPerImport", Schema::int())
        .required("sportTypesToImport", Schema::list_of(Schema::string()))
        .required(
            "activityVisibilitiesToImport",
            Schema::list_of(Schema::enumeration(VISIBILITIES)?),
        )
        .required("skipActivitiesRecordedBefore", Schema::nullable(Schema::string()))
        .required("activitiesToSkipDuringImport", Schema::list_of(Schema::string()))
        .build()
}

fn metrics() -> SchemaResult<Schema> {
    let eddington = ObjectSchema::builder()
        .closed(true)
        .required("label", Schema::string())
        .required("showInNavBar", Schema::boolean())
        .required("sportTypesToInclude", Schema::list_of(Schema::string()))
        .build()?;

    ObjectSchema::builder()
        .closed(true)
        .required("eddington", Schema::list_of(eddington))
        .required("consistencyChallenges", Schema::list_of(Schema::any()))
        .build()
}

fn zwift() -> SchemaResult<Schema> {
    ObjectSchema::builder()
        .closed(true)
        .required("level", Schema::nullable(Schema::int()))
        .required("racingScore", Schema::nullable(Schema::int()))
        .build()
}

fn integrations() -> SchemaResult<Schema> {
    let configuration = ObjectSchema::builder()
        .closed(true)
        .required("key", Schema::string())
        .required("model", Schema::string())
        .required("url", Schema::nullable(Schema::string()))
        .build()?;

    let ai = ObjectSchema::builder()
        .closed(true)
        .required("enabled", Schema::boolean())
        .required("enableUI", Schema::boolean())
        .optional("provider", Schema::enumeration(AI_PROVIDERS)?)
        .optional("configuration", configuration)
        .gated_by("enabled", ["provider", "configuration"])
        .build()?;

    ObjectSchema::builder()
        .closed(true)
        .required("ai", ai)
        .build()
}
