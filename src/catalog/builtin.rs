// Built-in pattern tables
// Collected from the layout directives, stylesheets and promotional blurbs that
// show up in GM Binder and Homebrewery exports.

/// Page-layout directives understood by the homebrew renderers
pub const FORMATTERS: &[&str] = &["\\pagebreak", "\\columnbreak", "\\page", "\\column"];

/// Keys found in the front-matter blocks that the renderers prepend to a document
pub const METADATA_KEYWORDS: &[&str] =
    &["title:", "description:", "tags:", "systems:", "renderer:"];

pub const HTML_TAG: &str = r"<[A-Za-z][^>]*/?>";

/// Bare URLs, used by the link stripper once structured links are gone
pub const URL: &str = r#"(?i)(?:https?://|www\.)[^\s<>()\[\]"']+"#;

/// Header block that Homebrewery/GM Binder inject above the rendered document
pub const PLATFORM_BOILERPLATE: &[&str] = &[
    r#"(?i)by \w+\n*\s*\[?Search GM Binder(\]\(/search "Search GM Binder"\))?\s*\n*\s*Print / Generate PDF\s*\n*\s*\[?Visit User Profile(\]\(/profile/\w*\))?\s*\n*\s*[^\n#]*"#,
];

pub const NOISY_CSS: &[&str] = &[
    r"table tr",
    r" td ",
    r"nth-child",
    r"a:link",
    r"last-child",
    r"th,?[ \t]*td",
    r"[0-9]*% \{",
    r"(?i)div\.[a-z]+",
    r":root",
    r"\.subclassSpells",
    r"\.presence",
    r"\.large-tablet",
    r"\.noborder",
    r"\.attribution",
    r"\.equation",
    r"\.proccingPresence",
    r"\.presenceEffect",
    r"\.phb",
    r"\.centered",
    r"\.TFtableCol",
    r"\.comment",
    r"\.decoration",
    r"\.signature",
    r"\.frontcredit",
    r"\.partcover",
    r"\.chapter",
    r"\.logo",
    r"\.decal",
    r"\.backcover",
    r"\.monster",
    r"\.pageNumber",
    r"\.coverSplotch",
    r"\.small-tablet",
    r"\.note",
    r"\.back",
    r"\.left",
    r"\.wide",
    r"\.stain",
    r"\.fullpage",
    r"\.insidecover",
    r"\.classTable",
    r"\.footer",
    r"\.block",
    r"\.footnote",
    r"\.hardcover",
    r"\.toc",
    r"\.regular",
    r"\.page",
    r"table\.table",
    r"@import",
    r"@keyframes",
    r"margin-top[ \t]*:",
    r"margin-bottom[ \t]*:",
    r"margin-right[ \t]*:",
    r"margin-left[ \t]*:",
    r"padding-bottom[ \t]*:",
    r"padding-top[ \t]*:",
    r"padding-right[ \t]*:",
    r"padding-left[ \t]*:",
    r"padding[ \t]*:",
    r"text-justify[ \t]*:",
    r"text-align[ \t]*:",
    r"text-decoration[ \t]*:",
    r"text-shadow[ \t]*:",
    r"text-index[ \t]*:",
    r"text-transform[ \t]*:",
    r"table-layout[ \t]*:[ \t]*[A-Za-z]*",
    r"position[ \t]*:[ \t]*(static|relative|absolute|fixed|sticky)",
    r"background-image[ \t]*:",
    r"background-position[ \t]*:",
    r"background-size[ \t]*:",
    r"background-repeat[ \t]*:",
    r"font-weight[ \t]*:",
    r"font-style[ \t]*:",
    r"font-family[ \t]*:",
    r"font-size[ \t]*:",
    r"font-variant[ \t]*:",
    r"border[ \t]*:",
    r"border-style[ \t]*:",
    r"border-image[ \t]*:",
    r"border-image-outset[ \t]*:",
    r"border-image-slice[ \t]*:",
    r"border-image-width[ \t]*:",
    r"box-shadow[ \t]*:",
    r"main-color-(dark|light|lighter|lightest|stripe1|stripe2)[ \t]*:",
    r"line-height[ \t]*:",
    r"mix-blend-mode[ \t]*:",
    r"width[ \t]*:[ \t]*[pxem%0-9-]*",
    r"height[ \t]*:[ \t]*[pxem%0-9-]*",
    r"top[ \t]*:[ \t]*[pxem%0-9-]*",
    r"bottom[ \t]*:[ \t]*[pxem%0-9-]*",
    r"z-index[ \t]*:",
    r"letter-spacing[ \t]*:",
    r"color[ \t]*:[ \t]*#",
    r"color[ \t]*:[ \t]*[A-Za-z]*\(?",
    r"webkit-text-stroke[ \t]*:",
    r"shadow-x[0-9]*[ \t]*:",
    r"vertical-align[0-9]*[ \t]*:",
    r"hue-rotate\(",
    r"transform:scale",
    r"-?[0-9]*px",
    r"var\([\w-]+\)",
    r"rgba?\(",
    r"/\*.*\*/",
    r"<!--[ \w]*-->",
    r"(?i)url\([^)]*\)",
];

/// Phrases that mark a section as credit/promotion outright
pub const HARD_DROP: &[&str] = &[
    r"((©)|(Â©)|(copyright))( [A-Z]*)?",
    r"homebrewery",
    r"\w*\.?pdf\w*",
    r"wizards of the coast",
    r"wotc",
    r"paizo",
    r"llc",
    r"tsr",
    r"inc\.?",
    r"glossary",
    r"design notes",
    r"change ?log",
    r"patreon",
    r"gm ?binder",
    r"[^ a-z]/?(u|r)/\w+",
    r"Supported By",
    r"The Part Where I Shill My Patreon",
    r"Special thanks to[\w ]*Patrons",
    r"WWW\.GMBINDER\.COM This document was lovingly created using GM Binder\.",
    r"(License\n)?OPEN GAME License",
];

/// Phrases that only count towards the promotional share of a section
pub const SOFT_DROP: &[&str] = &[
    r"credits?",
    r"acknowledgements?",
    r"legal( information)?",
    r"changes? ?(log)?",
    r"homebrew(ery?)?s?",
    r"((?<!martial )art((work)|(ist)|(station))?)",
    r"(special )?thank((s)|(you))( to)?",
    r"(table of )?contents?",
    r"glossary",
    r"notes",
    r"support((ed)|(ers))",
    r"by",
    r"version",
    r"Supported By",
];

/// Phrases after which the rest of a section is promotional
pub const SPLITTERS: &[&str] = &[
    r"Supported By",
    r"The Part Where I Shill My Patreon",
    r"Special thanks to[\w ]*Patrons",
    r"WWW\.GMBINDER\.COM This document was lovingly created using GM Binder\.",
    r"(License\n)?OPEN GAME License",
];

pub const JARGON: &[(&str, &str)] = &[
    ("dc", "difficulty class"),
    ("xp", "experience points"),
    ("gm", "game master"),
    ("dm", "game master"),
    ("hp", "hit points"),
    ("gp", "gold pieces"),
    ("sp", "silver pieces"),
    ("cp", "copper pieces"),
    ("pp", "platinum pieces"),
    ("mod", "modifier"),
    ("pc", "player character"),
    ("npc", "non-player character"),
    ("asi", "ability score increases"),
    ("dpr", "damage per round"),
    ("cr", "challenge rating"),
    ("ac", "armor class"),
    ("aoe", "area of effect"),
    ("gwm", "great weapons master"),
    ("dnd5e", "dungeons and dragons 5th edition"),
    ("dnd", "dungeons and dragons"),
    ("d&d", "dungeons and dragons"),
    ("5e", "5th edition"),
    ("e.g.", "eg"),
    ("i.e.", "ie"),
];

/// UTF-8 text that was decoded as Windows-1252 and re-encoded
pub const ENCODING_FIXES: &[(&str, &str)] = &[
    ("â‚¬", "€"),
    ("â€š", "‚"),
    ("â€ž", "„"),
    ("â€¦", "…"),
    ("Ë†", "ˆ"),
    ("â€¹", "‹"),
    ("â€˜", "‘"),
    ("â€™", "’"),
    ("â€œ", "“"),
    ("â€", "”"),
    ("â€¢", "•"),
    ("â€“", "–"),
    ("â€”", "—"),
    ("Ëœ", "˜"),
    ("â„¢", "™"),
    ("â€º", "›"),
    ("Å“", "œ"),
    ("Å’", "Œ"),
    ("Å¾", "ž"),
    ("Å¸", "Ÿ"),
    ("Å¡", "š"),
    ("Å½", "Ž"),
    ("Â¡", "¡"),
    ("Â¢", "¢"),
    ("Â£", "£"),
    ("Â¤", "¤"),
    ("Â¥", "¥"),
    ("Â¦", "¦"),
    ("Â§", "§"),
    ("Â¨", "¨"),
    ("Â©", "©"),
    ("Âª", "ª"),
    ("Â«", "«"),
    ("Â¬", "¬"),
    ("Â®", "®"),
    ("Â¯", "¯"),
    ("Â°", "°"),
    ("Â±", "±"),
    ("Â²", "²"),
    ("Â³", "³"),
    ("Â´", "´"),
    ("Âµ", "µ"),
    ("Â¶", "¶"),
    ("Â·", "·"),
    ("Â¸", "¸"),
    ("Â¹", "¹"),
    ("Âº", "º"),
    ("Â»", "»"),
    ("Â¼", "¼"),
    ("Â½", "½"),
    ("Â¾", "¾"),
    ("Â¿", "¿"),
    ("Ã€", "À"),
    ("Ã‚", "Â"),
    ("Ãƒ", "Ã"),
    ("Ã„", "Ä"),
    ("Ã…", "Å"),
    ("Ã†", "Æ"),
    ("Ã‡", "Ç"),
    ("Ãˆ", "È"),
    ("Ã‰", "É"),
    ("ÃŠ", "Ê"),
    ("Ã‹", "Ë"),
    ("ÃŒ", "Ì"),
    ("ÃŽ", "Î"),
    ("Ã‘", "Ñ"),
    ("Ã’", "Ò"),
    ("Ã“", "Ó"),
    ("Ã”", "Ô"),
    ("Ã•", "Õ"),
    ("Ã–", "Ö"),
    ("Ã—", "×"),
    ("Ã˜", "Ø"),
    ("Ã™", "Ù"),
    ("Ãš", "Ú"),
    ("Ã›", "Û"),
    ("Ãœ", "Ü"),
    ("Ãž", "Þ"),
    ("ÃŸ", "ß"),
    ("Ã¡", "á"),
    ("Ã¢", "â"),
    ("Ã£", "ã"),
    ("Ã¤", "ä"),
    ("Ã¥", "å"),
    ("Ã¦", "æ"),
    ("Ã§", "ç"),
    ("Ã¨", "è"),
    ("Ã©", "é"),
    ("Ãª", "ê"),
    ("Ã«", "ë"),
    ("Ã¬", "ì"),
    ("Ã\u{ad}", "í"),
    ("Ã®", "î"),
    ("Ã¯", "ï"),
    ("Ã°", "ð"),
    ("Ã±", "ñ"),
    ("Ã²", "ò"),
    ("Ã³", "ó"),
    ("Ã´", "ô"),
    ("Ãµ", "õ"),
    ("Ã¶", "ö"),
    ("Ã·", "÷"),
    ("Ã¸", "ø"),
    ("Ã¹", "ù"),
    ("Ãº", "ú"),
    ("Ã»", "û"),
    ("Ã¼", "ü"),
    ("Ã½", "ý"),
    ("Ã¾", "þ"),
    ("Ã¿", "ÿ"),
];
