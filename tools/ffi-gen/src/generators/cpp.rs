//! C++ header generator
//!
//! Emits thin inline wrappers over the C header: strings are copied into
//! `std::string` and released immediately, failing integer returns throw
//! `aigamedev::Error`. On top of the wrappers sit the typed request and
//! result structs, the engine enum and presets (all taken from the Rust
//! definitions so the two sides cannot drift), and a `Session` RAII class
//! when the library exports everything it needs.

use aigamedev_core::presets::{self, PRESET_NAMES};
use aigamedev_core::{GameConfig, GameEngine};
use anyhow::Result;
use std::fmt::Write as FmtWrite;

use super::{C_HEADER_NAME, GENERATED_NOTICE};
use crate::model::{FfiFunction, FfiModel};

/// Prefix stripped from C names to form wrapper names.
const PREFIX: &str = "ai_game_dev_";

/// Exports the `Session` class is built on.
const SESSION_REQUIRES: &[&str] = &[
    "ai_game_dev_init",
    "ai_game_dev_cleanup",
    "ai_game_dev_create_game",
    "ai_game_dev_get_result",
    "ai_game_dev_supported_engines",
    "ai_game_dev_version",
    "ai_game_dev_get_last_error",
    "ai_game_dev_free_string",
];

const INCLUDES: &[&str] = &[
    "cctype",
    "cstdint",
    "cstdio",
    "future",
    "optional",
    "stdexcept",
    "string",
    "utility",
    "vector",
];

const PRELUDE: &str = r#"class Error : public std::runtime_error {
public:
    explicit Error(const std::string& message)
        : std::runtime_error("AI Game Dev Error: " + message) {}
};

namespace detail {

inline std::string take(char* ptr) {
    std::string out = ptr ? ptr : "";
    ai_game_dev_free_string(ptr);
    return out;
}

inline std::string last_error() {
    return take(ai_game_dev_get_last_error());
}

/** Encode `s` as a JSON string literal. */
inline std::string quote(const std::string& s) {
    std::string out = "\"";
    for (char ch : s) {
        unsigned char c = static_cast<unsigned char>(ch);
        switch (c) {
            case '"': out += "\\\""; break;
            case '\\': out += "\\\\"; break;
            case '\b': out += "\\b"; break;
            case '\f': out += "\\f"; break;
            case '\n': out += "\\n"; break;
            case '\r': out += "\\r"; break;
            case '\t': out += "\\t"; break;
            default:
                if (c < 0x20) {
                    char buf[8];
                    std::snprintf(buf, sizeof buf, "\\u%04x", static_cast<unsigned>(c));
                    out += buf;
                } else {
                    out += ch;
                }
        }
    }
    out += '"';
    return out;
}

/** Reader for the JSON documents the library returns. Throws Error on malformed input. */
class JsonReader {
public:
    explicit JsonReader(std::string text) : text_(std::move(text)) {}

    /** Consume `c` if it is the next token. */
    bool consume(char c) {
        skip_ws();
        if (pos_ < text_.size() && text_[pos_] == c) {
            ++pos_;
            return true;
        }
        return false;
    }

    void expect(char c) {
        if (!consume(c)) {
            fail(std::string("expected '") + c + "'");
        }
    }

    std::string read_string() {
        expect('"');
        std::string out;
        while (pos_ < text_.size()) {
            char c = text_[pos_++];
            if (c == '"') {
                return out;
            }
            if (c != '\\') {
                out += c;
                continue;
            }
            if (pos_ >= text_.size()) {
                break;
            }
            switch (text_[pos_++]) {
                case '"': out += '"'; break;
                case '\\': out += '\\'; break;
                case '/': out += '/'; break;
                case 'b': out += '\b'; break;
                case 'f': out += '\f'; break;
                case 'n': out += '\n'; break;
                case 'r': out += '\r'; break;
                case 't': out += '\t'; break;
                case 'u': append_utf8(out, read_code_point()); break;
                default: fail("invalid escape");
            }
        }
        fail("unterminated string");
    }

    bool read_bool() {
        skip_ws();
        if (text_.compare(pos_, 4, "true") == 0) {
            pos_ += 4;
            return true;
        }
        if (text_.compare(pos_, 5, "false") == 0) {
            pos_ += 5;
            return false;
        }
        fail("expected a boolean");
    }

    std::vector<std::string> read_string_array() {
        std::vector<std::string> out;
        expect('[');
        if (consume(']')) {
            return out;
        }
        do {
            out.push_back(read_string());
        } while (consume(','));
        expect(']');
        return out;
    }

    /** Read an object, calling `field(key)` with the reader positioned at each value. */
    template <typename F>
    void read_object(F&& field) {
        expect('{');
        if (consume('}')) {
            return;
        }
        do {
            std::string key = read_string();
            expect(':');
            field(key);
        } while (consume(','));
        expect('}');
    }

    void skip_value() {
        skip_ws();
        if (pos_ >= text_.size()) {
            fail("unexpected end of input");
        }
        char c = text_[pos_];
        if (c == '"') {
            read_string();
        } else if (c == '{') {
            read_object([this](const std::string&) { skip_value(); });
        } else if (c == '[') {
            ++pos_;
            if (consume(']')) {
                return;
            }
            do {
                skip_value();
            } while (consume(','));
            expect(']');
        } else {
            std::size_t start = pos_;
            while (pos_ < text_.size() && !is_delimiter(text_[pos_])) {
                ++pos_;
            }
            if (pos_ == start) {
                fail("expected a value");
            }
        }
    }

    /** Fail unless only whitespace remains. */
    void finish() {
        skip_ws();
        if (pos_ != text_.size()) {
            fail("trailing characters");
        }
    }

private:
    static bool is_delimiter(char c) {
        return c == ',' || c == '}' || c == ']' || c == ' ' || c == '\t' || c == '\n' ||
               c == '\r';
    }

    void skip_ws() {
        while (pos_ < text_.size() &&
               (text_[pos_] == ' ' || text_[pos_] == '\t' || text_[pos_] == '\n' ||
                text_[pos_] == '\r')) {
            ++pos_;
        }
    }

    uint32_t read_hex4() {
        if (text_.size() - pos_ < 4) {
            fail("truncated escape");
        }
        uint32_t value = 0;
        for (int i = 0; i < 4; ++i) {
            char c = text_[pos_++];
            value <<= 4;
            if (c >= '0' && c <= '9') {
                value |= static_cast<uint32_t>(c - '0');
            } else if (c >= 'a' && c <= 'f') {
                value |= static_cast<uint32_t>(c - 'a' + 10);
            } else if (c >= 'A' && c <= 'F') {
                value |= static_cast<uint32_t>(c - 'A' + 10);
            } else {
                fail("invalid hex digit");
            }
        }
        return value;
    }

    uint32_t read_code_point() {
        uint32_t cp = read_hex4();
        if (cp >= 0xD800 && cp <= 0xDBFF && text_.compare(pos_, 2, "\\u") == 0) {
            pos_ += 2;
            uint32_t low = read_hex4();
            if (low < 0xDC00 || low > 0xDFFF) {
                fail("invalid surrogate pair");
            }
            cp = 0x10000 + ((cp - 0xD800) << 10) + (low - 0xDC00);
        }
        return cp;
    }

    static void append_utf8(std::string& out, uint32_t cp) {
        if (cp < 0x80) {
            out += static_cast<char>(cp);
        } else if (cp < 0x800) {
            out += static_cast<char>(0xC0 | (cp >> 6));
            out += static_cast<char>(0x80 | (cp & 0x3F));
        } else if (cp < 0x10000) {
            out += static_cast<char>(0xE0 | (cp >> 12));
            out += static_cast<char>(0x80 | ((cp >> 6) & 0x3F));
            out += static_cast<char>(0x80 | (cp & 0x3F));
        } else {
            out += static_cast<char>(0xF0 | (cp >> 18));
            out += static_cast<char>(0x80 | ((cp >> 12) & 0x3F));
            out += static_cast<char>(0x80 | ((cp >> 6) & 0x3F));
            out += static_cast<char>(0x80 | (cp & 0x3F));
        }
    }

    [[noreturn]] void fail(const std::string& what) const {
        throw Error("malformed JSON from library: " + what + " at offset " +
                    std::to_string(pos_));
    }

    std::string text_;
    std::size_t pos_ = 0;
};

}  // namespace detail
"#;

const ENGINE: &str = r#"/** Target engine. Values are the library's wire codes. */
enum class GameEngine : int32_t {
@VARIANTS@};

/** Lowercase engine name as reported in results. */
inline std::string engine_to_string(GameEngine engine) {
    switch (engine) {
@TO_NAME@    }
    return @FALLBACK@;
}

/** Parse an engine name, ignoring ASCII case. */
inline std::optional<GameEngine> string_to_engine(std::string name) {
    for (char& c : name) {
        c = static_cast<char>(std::tolower(static_cast<unsigned char>(c)));
    }
@FROM_NAME@    return std::nullopt;
}
"#;

/// `@ENGINE@` and `@COMPLEXITY@` are the Rust defaults.
const CONFIG: &str = r#"/** Configuration for one generation request. */
struct GameConfig {
    GameEngine engine = GameEngine::@ENGINE@;
    std::string complexity = @COMPLEXITY@;
    std::string target_audience;
    std::vector<std::string> features;

    GameConfig& with_engine(GameEngine value) {
        engine = value;
        return *this;
    }

    GameConfig& with_complexity(std::string value) {
        complexity = std::move(value);
        return *this;
    }

    GameConfig& with_target_audience(std::string value) {
        target_audience = std::move(value);
        return *this;
    }

    GameConfig& with_features(std::vector<std::string> value) {
        features = std::move(value);
        return *this;
    }

    GameConfig& add_feature(std::string value) {
        features.push_back(std::move(value));
        return *this;
    }

    /** Wire encoding accepted by ai_game_dev_create_game. */
    std::string to_json() const {
        std::string out = "{\"engine\":" + std::to_string(static_cast<int32_t>(engine));
        out += ",\"complexity\":" + detail::quote(complexity);
        out += ",\"target_audience\":" + detail::quote(target_audience);
        out += ",\"features\":[";
        for (std::size_t i = 0; i < features.size(); ++i) {
            if (i > 0) {
                out += ',';
            }
            out += detail::quote(features[i]);
        }
        out += "]}";
        return out;
    }
};
"#;

const RESULT: &str = r#"/** Outcome of a generation request. */
struct GameResult {
    std::string title;
    std::string description;
    std::string engine;
    bool success = false;
    std::vector<std::string> files_generated;
    std::string output_directory;
    std::string error_message;

    /** Decode the JSON returned by ai_game_dev_get_result. Unknown keys are skipped. */
    static GameResult from_json(const std::string& json) {
        GameResult result;
        detail::JsonReader reader(json);
        reader.read_object([&](const std::string& key) {
            if (key == "title") {
                result.title = reader.read_string();
            } else if (key == "description") {
                result.description = reader.read_string();
            } else if (key == "engine") {
                result.engine = reader.read_string();
            } else if (key == "success") {
                result.success = reader.read_bool();
            } else if (key == "files_generated") {
                result.files_generated = reader.read_string_array();
            } else if (key == "output_directory") {
                result.output_directory = reader.read_string();
            } else if (key == "error_message") {
                result.error_message = reader.read_string();
            } else {
                reader.skip_value();
            }
        });
        reader.finish();
        return result;
    }
};
"#;

const PRESET: &str = r#"inline GameConfig @NAME@() {
    return GameConfig()
        .with_engine(GameEngine::@ENGINE@)
        .with_complexity(@COMPLEXITY@)
        .with_target_audience(@AUDIENCE@)
        .with_features({@FEATURES@});
}
"#;

const SESSION: &str = r#"/**
 * Owns library initialization for its lifetime.
 *
 * Cleanup on destruction drops every game created through any session.
 */
class Session {
public:
    Session() { raw::init(); }
    ~Session() { ai_game_dev_cleanup(); }

    Session(const Session&) = delete;
    Session& operator=(const Session&) = delete;

    /** Generate a game. Throws Error carrying the library's message on failure. */
    GameResult create_game(const std::string& description, const GameConfig& config = {}) const {
        int32_t id = raw::create_game(description, config.to_json());
        std::string json = raw::get_result(id);
        if (json.rfind("{\"error\"", 0) == 0) {
            throw Error(detail::last_error());
        }
        return GameResult::from_json(json);
    }

    /** Run create_game on a worker thread. */
    std::future<GameResult> create_game_async(std::string description, GameConfig config = {}) const {
        return std::async(std::launch::async,
            [this, description = std::move(description), config = std::move(config)] {
                return create_game(description, config);
            });
    }

    GameResult create_bevy_game(const std::string& description,
                                const std::string& complexity = "intermediate") const {
        return create_game(description,
                           GameConfig().with_engine(GameEngine::Bevy).with_complexity(complexity));
    }

    GameResult create_godot_game(const std::string& description,
                                 const std::string& complexity = "intermediate") const {
        return create_game(description,
                           GameConfig().with_engine(GameEngine::Godot).with_complexity(complexity));
    }

    GameResult create_arcade_game(const std::string& description,
                                  const std::string& complexity = "simple") const {
        return create_game(description,
                           GameConfig().with_engine(GameEngine::Arcade).with_complexity(complexity));
    }

    std::vector<std::string> supported_engines() const {
        detail::JsonReader reader(raw::supported_engines());
        std::vector<std::string> engines = reader.read_string_array();
        reader.finish();
        return engines;
    }

    std::string version() const { return raw::version(); }
    std::string last_error() const { return detail::last_error(); }
};
"#;

/// Generate the C++ header from FFI model
pub fn generate_cpp_header(model: &FfiModel) -> Result<String> {
    if !model.has_all(&["ai_game_dev_free_string", "ai_game_dev_get_last_error"]) {
        anyhow::bail!("C++ wrappers need ai_game_dev_free_string and ai_game_dev_get_last_error");
    }

    let mut output = String::new();

    writeln!(output, "{GENERATED_NOTICE}")?;
    writeln!(output, "#pragma once")?;
    writeln!(output)?;
    writeln!(output, "#include \"{C_HEADER_NAME}\"")?;
    writeln!(output)?;
    for header in INCLUDES {
        writeln!(output, "#include <{header}>")?;
    }
    writeln!(output)?;
    writeln!(output, "namespace aigamedev {{")?;
    writeln!(output)?;
    writeln!(output, "{PRELUDE}")?;

    writeln!(output, "{}", engine_section()?)?;
    writeln!(output, "{}", config_struct())?;
    writeln!(output, "{RESULT}")?;
    writeln!(output, "{}", presets_namespace())?;

    writeln!(output, "namespace raw {{")?;
    writeln!(output)?;
    for func in model.functions.iter().filter(|f| is_wrappable(f)) {
        write_wrapper(&mut output, func)?;
        writeln!(output)?;
    }
    writeln!(output, "}}  // namespace raw")?;
    writeln!(output)?;

    if model.has_all(SESSION_REQUIRES) {
        writeln!(output, "{SESSION}")?;
    }

    writeln!(output, "}}  // namespace aigamedev")?;

    Ok(output)
}

/// `GameEngine` enum plus name conversions, one entry per Rust variant.
fn engine_section() -> Result<String> {
    let mut variants = String::new();
    let mut to_name = String::new();
    let mut from_name = String::new();
    for engine in GameEngine::ALL {
        let code = engine as i32;
        let name = cpp_string(engine.name());
        let variant = format!("GameEngine::{engine:?}");
        writeln!(variants, "    {engine:?} = {code},")?;
        writeln!(to_name, "        case {variant}: return {name};")?;
        writeln!(from_name, "    if (name == {name}) return {variant};")?;
    }

    Ok(ENGINE
        .replace("@VARIANTS@", &variants)
        .replace("@TO_NAME@", &to_name)
        .replace("@FALLBACK@", &cpp_string(GameEngine::default().name()))
        .replace("@FROM_NAME@", &from_name))
}

fn config_struct() -> String {
    let defaults = GameConfig::default();
    CONFIG
        .replace("@ENGINE@", &format!("{:?}", defaults.engine))
        .replace("@COMPLEXITY@", &cpp_string(&defaults.complexity))
}

/// One inline constructor per built-in preset.
fn presets_namespace() -> String {
    let mut out = String::from("namespace presets {\n\n");
    for name in PRESET_NAMES {
        let Some(config) = presets::preset(name) else {
            continue;
        };
        let features: Vec<String> = config.features.iter().map(|f| cpp_string(f)).collect();
        let preset = PRESET
            .replace("@NAME@", name)
            .replace("@ENGINE@", &format!("{:?}", config.engine))
            .replace("@COMPLEXITY@", &cpp_string(&config.complexity))
            .replace("@AUDIENCE@", &cpp_string(&config.target_audience))
            .replace("@FEATURES@", &features.join(", "));
        out.push_str(&preset);
        out.push('\n');
    }
    out.push_str("}  // namespace presets\n");
    out
}

/// Quote `s` as a C++ string literal.
fn cpp_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Functions taking library-owned strings stay C-only.
fn is_wrappable(func: &FfiFunction) -> bool {
    !func.params.iter().any(|p| p.ty.is_owned_string())
}

fn wrapper_name(func: &FfiFunction) -> &str {
    func.name.strip_prefix(PREFIX).unwrap_or(&func.name)
}

fn write_wrapper(output: &mut String, func: &FfiFunction) -> Result<()> {
    if let Some(summary) = func.doc_comment.lines().next().filter(|l| !l.is_empty()) {
        writeln!(output, "/** {summary} */")?;
    }

    let params = func
        .params
        .iter()
        .map(|p| {
            if p.ty.is_borrowed_string() {
                format!("const std::string& {}", p.name)
            } else {
                format!("{} {}", p.ty.c_type, p.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let args = func
        .params
        .iter()
        .map(|p| {
            if p.ty.is_borrowed_string() {
                format!("{}.c_str()", p.name)
            } else {
                p.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let call = format!("{}({})", func.name, args);
    let name = wrapper_name(func);

    if func.return_type.is_owned_string() {
        writeln!(output, "inline std::string {name}({params}) {{")?;
        writeln!(output, "    return detail::take({call});")?;
    } else if func.return_type.is_void() {
        writeln!(output, "inline void {name}({params}) {{")?;
        writeln!(output, "    {call};")?;
    } else {
        let ty = &func.return_type.c_type;
        writeln!(output, "inline {ty} {name}({params}) {{")?;
        writeln!(output, "    {ty} rc = {call};")?;
        writeln!(output, "    if (rc < 0) {{")?;
        writeln!(output, "        throw Error(detail::last_error());")?;
        writeln!(output, "    }}")?;
        writeln!(output, "    return rc;")?;
    }
    writeln!(output, "}}")?;

    Ok(())
}
