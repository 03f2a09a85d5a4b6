use custom_error::custom_error;

custom_error! {
    pub SolveError
    InvalidConfiguration{source: ConfigError} = "invalid configuration: {source}",
    Search{source: SearchError} = "search error: {source}",
    DivergentOutcome{floors: u64, secret: u64, stepped: String, batch: String} =
        "stepping and batch solving disagree for {floors} floors with secret floor {secret}: \
         stepping gave '{stepped}', batch solving gave '{batch}'",
    WrongFloor{expected: u64, found: u64} =
        "the search settled on floor {found}, but the breaking floor is {expected}",
    InvalidScenario{index: usize, reason: ConfigError} = "scenario #{index} is invalid: {reason}",
    EmptyInput = "no input was given on the standard input",
    MalformedNumber{input: String} = "'{input}' is not a valid floor number",
    Io{source: std::io::Error} = "Input/Output error: {source}",
    Json{source: serde_json::Error} = "Unable to encode the report as JSON: {source}",
    Yaml{source: serde_yaml::Error} = "Invalid YAML: {source}",
}

custom_error! {pub ConfigError
    NoFloors = "a building must have at least one floor",
    TooManyFloors{floors: u64, max: u64} = "a building can have at most {max} floors, not {floors}",
    SecretOutOfRange{secret: u64, floors: u64} =
        "the breaking floor {secret} is outside of the building's floors [0, {floors})",
}

custom_error! {pub SearchError
    Unfinished{drops: usize} = "the search is still running after {drops} drops",
    NothingToProbe = "no floor was planned, the building has no floor",
    ScanExhausted{first: u64, last: u64} =
        "floor {last} broke the first probe, but no floor from {first} to {last} broke the second one",
    NoBreakingFloor{floors: u64} = "none of the {floors} floors broke the probe",
}
