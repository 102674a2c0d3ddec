//! Rule table: the ordered (matcher, command) pairs the dispatcher scans.
//!
//! Evaluation is strictly first-match-wins in table order. Because a broad
//! rule placed before a narrow one silently disables it, `RuleTable::shadowed`
//! reports every rule that can never fire.

use std::fmt;

use gopher_core::config::schema::PlaygroundConfig;
use gopher_core::types::FileRef;

use crate::action::Audience;
use crate::commands::Command;
use crate::resources;

// ─────────────────────────────────────────────
// Matcher
// ─────────────────────────────────────────────

/// How a rule tests a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Matcher {
    /// Text contains the pattern anywhere.
    Contains(&'static str),
    /// Text starts with the pattern.
    HasPrefix(&'static str),
    /// Text equals the pattern exactly.
    Equals(&'static str),
    /// An attached file of one of `filetypes`, unless the text contains `opt_out`.
    FileUpload {
        filetypes: &'static [&'static str],
        opt_out: &'static str,
    },
}

impl Matcher {
    /// Test already-normalized text (and the attached file, if any).
    pub fn matches(&self, text: &str, file: Option<&FileRef>) -> bool {
        match self {
            Matcher::Contains(p) => text.contains(p),
            Matcher::HasPrefix(p) => text.starts_with(p),
            Matcher::Equals(p) => text == *p,
            Matcher::FileUpload { filetypes, opt_out } => {
                !text.contains(opt_out)
                    && file.is_some_and(|f| filetypes.iter().any(|t| *t == f.filetype))
            }
        }
    }

    /// The text pattern, if this matcher has one.
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            Matcher::Contains(p) | Matcher::HasPrefix(p) | Matcher::Equals(p) => Some(*p),
            Matcher::FileUpload { .. } => None,
        }
    }

    /// Whether every text matched by `later` is also matched by `self`.
    fn covers(&self, later: &Matcher) -> bool {
        use Matcher::*;
        match (self, later) {
            (Contains(a), Contains(b) | HasPrefix(b) | Equals(b)) => b.contains(a),
            (HasPrefix(a), HasPrefix(b) | Equals(b)) => b.starts_with(a),
            (Equals(a), Equals(b)) => a == b,
            (
                FileUpload {
                    filetypes: a,
                    opt_out: oa,
                },
                FileUpload {
                    filetypes: b,
                    opt_out: ob,
                },
            ) => oa == ob && b.iter().all(|t| a.contains(t)),
            _ => false,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Contains(p) => write!(f, "contains {p:?}"),
            Matcher::HasPrefix(p) => write!(f, "prefix {p:?}"),
            Matcher::Equals(p) => write!(f, "equals {p:?}"),
            Matcher::FileUpload { filetypes, opt_out } => {
                write!(f, "upload {} (unless {opt_out:?})", filetypes.join("/"))
            }
        }
    }
}

// ─────────────────────────────────────────────
// Rule
// ─────────────────────────────────────────────

/// Which messages a rule sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Every message, matched against the full normalized text.
    Ambient,
    /// Only messages addressed to the bot, matched with the wake word stripped.
    Addressed,
}

/// One entry in the rule table.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Short identifier used in logs.
    pub name: &'static str,
    pub matcher: Matcher,
    pub scope: Scope,
    pub command: Command,
}

impl Rule {
    pub fn ambient(name: &'static str, matcher: Matcher, command: Command) -> Self {
        Rule {
            name,
            matcher,
            scope: Scope::Ambient,
            command,
        }
    }

    pub fn addressed(name: &'static str, matcher: Matcher, command: Command) -> Self {
        Rule {
            name,
            matcher,
            scope: Scope::Addressed,
            command,
        }
    }
}

impl Rule {
    /// Whether `self`, placed earlier, fires on every message `later` would.
    ///
    /// Addressed text is the normalized text minus the wake word, so it is
    /// always a substring of what ambient rules see. Only a `Contains`
    /// ambient matcher survives that difference.
    fn pre_empts(&self, later: &Rule) -> bool {
        match (self.scope, later.scope) {
            (a, b) if a == b => self.matcher.covers(&later.matcher),
            (Scope::Ambient, Scope::Addressed) => {
                matches!(self.matcher, Matcher::Contains(_)) && self.matcher.covers(&later.matcher)
            }
            _ => false,
        }
    }
}

/// A later rule that an earlier rule always pre-empts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shadowing {
    /// Index of the rule that wins.
    pub earlier: usize,
    /// Index of the rule that can never fire.
    pub later: usize,
}

// ─────────────────────────────────────────────
// RuleTable
// ─────────────────────────────────────────────

/// Ordered, immutable list of rules.
#[derive(Clone, Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The community command set.
    pub fn standard(playground: &PlaygroundConfig) -> Self {
        use Command::*;
        use Matcher::*;

        let say = |text: &'static str| Say {
            text,
            audience: Audience::Channel,
        };

        Self::new(vec![
            // Ambient: react to anything said anywhere
            Rule::ambient("table-flip", Contains("︵"), say(resources::TABLE_UNFLIP)),
            Rule::ambient("table-flip", Contains("彡"), say(resources::TABLE_UNFLIP)),
            Rule::ambient("adorable-gophers", Contains("my adorable little gophers"), React(&["gopher"])),
            Rule::ambient("bbq", Contains("bbq"), React(&["bbqgopher"])),
            Rule::ambient("ermergerd", Contains("ermergerd"), React(&["dragon"])),
            Rule::ambient("ermergerd", Contains("ermahgerd"), React(&["dragon"])),
            Rule::ambient("beer-me", Contains("beer me"), React(&["beer", "beers"])),
            Rule::ambient("godoc-github", HasPrefix("ghd/"), Godoc { import_prefix: "github.com/" }),
            Rule::ambient("godoc", HasPrefix("d/"), Godoc { import_prefix: "" }),
            Rule::ambient(
                "playground",
                FileUpload {
                    filetypes: &["go", "text"],
                    opt_out: "nolink",
                },
                Playground {
                    link_template: playground.link_template.clone(),
                },
            ),
            // Addressed: commands for the bot
            Rule::addressed(
                "newbie-resources",
                Equals("newbie resources"),
                Attach {
                    intro: resources::NEWBIE_RESOURCES_INTRO,
                    body: resources::NEWBIE_RESOURCES,
                    audience: Audience::Channel,
                },
            ),
            Rule::addressed(
                "newbie-resources-pvt",
                Equals("newbie resources pvt"),
                Attach {
                    intro: resources::NEWBIE_RESOURCES_INTRO,
                    body: resources::NEWBIE_RESOURCES,
                    audience: Audience::Sender,
                },
            ),
            Rule::addressed("recommended-channels", Equals("recommended channels"), RecommendedChannels),
            Rule::addressed("oss-help", Equals("oss help"), say(resources::OSS_HELP)),
            Rule::addressed("oss-help", Equals("oss help wanted"), say(resources::OSS_HELP)),
            Rule::addressed("forks", Equals("work with forks"), say(resources::WORK_WITH_FORKS)),
            Rule::addressed("block-forever", Equals("block forever"), say(resources::BLOCK_FOREVER)),
            Rule::addressed("http-timeouts", Equals("http timeouts"), say(resources::HTTP_TIMEOUTS)),
            Rule::addressed("slices", Equals("slices"), say(resources::SLICES)),
            Rule::addressed("database", Equals("database tutorial"), say(resources::DATABASE_TUTORIAL)),
            Rule::addressed("xkcd", Equals("xkcd:standards"), Comic(resources::XKCD_STANDARDS)),
            Rule::addressed("xkcd", Equals("xkcd:compiling"), Comic(resources::XKCD_COMPILING)),
            Rule::addressed("xkcd", Equals("xkcd:optimization"), Comic(resources::XKCD_OPTIMIZATION)),
            Rule::addressed("xkcd-number", HasPrefix("xkcd:"), XkcdNumber),
            Rule::addressed("package-layout", Equals("package layout"), say(resources::PACKAGE_LAYOUT)),
            Rule::addressed("idiomatic-go", Equals("idiomatic go"), say(resources::IDIOMATIC_GO)),
            Rule::addressed("gotchas", Equals("avoid gotchas"), say(resources::AVOID_GOTCHAS)),
            Rule::addressed("source-code", Equals("source code"), say(resources::SOURCE_CODE)),
            Rule::addressed("library-search", HasPrefix("library for"), LibrarySearch),
            Rule::addressed("thanks", Contains("thank"), React(&["gopher"])),
            Rule::addressed("thanks", Equals("cheers"), React(&["gopher"])),
            Rule::addressed("thanks", Equals("hello"), React(&["gopher"])),
            Rule::addressed("wave", Equals("wave"), React(&["wave", "gopher"])),
            Rule::addressed("flip-coin", Equals("flip coin"), FlipCoin),
            Rule::addressed("flip-coin", Equals("flip a coin"), FlipCoin),
            Rule::addressed("location", Equals("where do you live?"), say(resources::BOT_LOCATION)),
            Rule::addressed("location", Equals("stack"), say(resources::BOT_LOCATION)),
            Rule::addressed("version", Equals("version"), Version),
            Rule::addressed(
                "help",
                Equals("help"),
                Attach {
                    intro: resources::HELP_INTRO,
                    body: resources::HELP,
                    audience: Audience::Sender,
                },
            ),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every (earlier, later) pair where the earlier rule matches everything
    /// the later one does.
    pub fn shadowed(&self) -> Vec<Shadowing> {
        let mut found = Vec::new();
        for (later, rule) in self.rules.iter().enumerate() {
            if let Some(earlier) = self.rules[..later]
                .iter()
                .position(|e| e.pre_empts(rule))
            {
                found.push(Shadowing { earlier, later });
            }
        }
        found
    }
}
