//! Built-in wiki configuration.
//!
//! Wikitext documents are not self-encapsulated and cannot be parsed without
//! knowing which words are namespace names, magic words, and so on. These
//! tables describe an English-language Wikipedia. Other languages extend them
//! through a [`Localization`](crate::localization::Localization).

use crate::{title::Namespace, wikitext::ConfigurationSource};

/// The static source configuration for the built-in wiki language.
pub(crate) static CONFIG_SOURCE: ConfigurationSource = ConfigurationSource {
    behavior_switches: &[
        "__NOTOC__", "__FORCETOC__", "__TOC__", "__NOEDITSECTION__", "__NEWSECTIONLINK__",
        "__NONEWSECTIONLINK__", "__NOGALLERY__", "__HIDDENCAT__", "__NOCONTENTCONVERT__",
        "__NOCC__", "__NOTITLECONVERT__", "__NOTC__", "__START__", "__END__", "__INDEX__",
        "__NOINDEX__", "__STATICREDIRECT__", "__NOGLOBAL__",
    ],
    extension_tags: phf::phf_set! {
        "categorytree", "ce", "charinsert", "chem", "gallery", "graph", "hiero", "imagemap",
        "indicator", "inputbox", "maplink", "math", "poem", "pre", "ref", "references",
        "score", "section", "source", "syntaxhighlight", "templatedata", "timeline"
    },
    language_codes: &["en", "ceb", "sv", "de", "nl", "fr", "ru", "it", "es", "war"],
    modifiers: &["int", "msg", "raw", "msgnw", "subst", "safesubst"],
    namespaces: &[
        Namespace { id: Namespace::MAIN, names: &[""] },
        Namespace { id: 2, names: &["User"] },
        Namespace { id: 4, names: &["Wikipedia", "WP", "Project"] },
        Namespace { id: 6, names: &["File", "Image"] },
        Namespace { id: 8, names: &["MediaWiki"] },
        Namespace { id: Namespace::TEMPLATE, names: &["Template"] },
        Namespace { id: 12, names: &["Help"] },
        Namespace { id: Namespace::CATEGORY, names: &["Category"] },
        Namespace { id: 100, names: &["Portal"] },
        Namespace { id: 108, names: &["Book"] },
        Namespace { id: 118, names: &["Draft"] },
        Namespace { id: 446, names: &["Education Program"] },
        Namespace { id: 710, names: &["TimedText"] },
        Namespace { id: 828, names: &["Module"] },
        Namespace { id: 2300, names: &["Gadget"] },
        Namespace { id: 2302, names: &["Gadget definition"] },
        Namespace { id: -1, names: &["Special"] },
        Namespace { id: -2, names: &["Media"] },
    ],
    // The project namespace and the project interwiki prefix differ only by
    // case, so these two must be matched exactly.
    exact_case_namespaces: &["Wikipedia"],
    exact_case_projects: &["wikipedia"],
    parser_functions: &[
        "localurl", "fullurl", "canonicalurl", "filepath", "urlencode", "anchorencode", "ns",
        "nse", "formatnum", "#dateformat", "#formatdate", "lc", "lcfirst", "uc", "ucfirst",
        "padleft", "padright", "plural", "grammar", "gender", "int", "#language", "#special",
        "#speciale", "#tag", "#invoke", "#expr", "#if", "#ifeq", "#iferror", "#ifexpr",
        "#ifexist", "#rel2abs", "#switch", "#time", "#timel", "#titleparts",
    ],
    projects: &[
        "wikipedia", "wiktionary", "wikinews", "wikibooks", "wikiquote", "wikisource",
        "oldwikisource", "wikispecies", "wikiversity", "wikivoyage", "wikimedia", "foundation",
        "commons", "metawikipedia", "meta", "incubator", "strategy", "mediawikiwiki",
        "mediazilla", "bugzilla", "phabricator", "testwiki", "wikidata", "wikitech",
        "toollabs", "w", "wikt", "n", "b", "q", "s", "species", "v", "voy", "wmf", "c", "m",
        "mw", "phab", "d",
    ],
    variables: &[
        "CURRENTYEAR", "CURRENTMONTH", "CURRENTMONTH1", "CURRENTMONTHNAME",
        "CURRENTMONTHNAMEGEN", "CURRENTMONTHABBREV", "CURRENTDAY", "CURRENTDAY2",
        "CURRENTDOW", "CURRENTDAYNAME", "CURRENTTIME", "CURRENTHOUR", "CURRENTWEEK",
        "CURRENTTIMESTAMP", "LOCALYEAR", "LOCALMONTH", "LOCALMONTH1", "LOCALMONTHNAME",
        "LOCALMONTHNAMEGEN", "LOCALMONTHABBREV", "LOCALDAY", "LOCALDAY2", "LOCALDOW",
        "LOCALDAYNAME", "LOCALTIME", "LOCALHOUR", "LOCALWEEK", "LOCALTIMESTAMP", "SITENAME",
        "SERVER", "SERVERNAME", "DIRMARK", "DIRECTIONMARK", "SCRIPTPATH", "STYLEPATH",
        "CURRENTVERSION", "CONTENTLANGUAGE", "CONTENTLANG", "PAGEID", "PAGELANGUAGE",
        "PROTECTIONLEVEL", "PROTECTIONEXPIRY", "CASCADINGSOURCES", "REVISIONID",
        "REVISIONDAY", "REVISIONDAY2", "REVISIONMONTH", "REVISIONMONTH1", "REVISIONYEAR",
        "REVISIONTIMESTAMP", "REVISIONUSER", "REVISIONSIZE", "DISPLAYTITLE", "DEFAULTSORT",
        "DEFAULTSORTKEY", "DEFAULTCATEGORYSORT", "NUMBEROFPAGES", "NUMBEROFARTICLES",
        "NUMBEROFFILES", "NUMBEROFEDITS", "NUMBEROFVIEWS", "NUMBEROFUSERS", "NUMBEROFADMINS",
        "NUMBEROFACTIVEUSERS", "PAGESINCATEGORY", "PAGESINCAT", "NUMBERINGROUP",
        "PAGESINNS", "PAGESINNAMESPACE", "FULLPAGENAME", "PAGENAME",
        "BASEPAGENAME", "SUBPAGENAME", "SUBJECTPAGENAME", "ARTICLEPAGENAME", "TALKPAGENAME",
        "ROOTPAGENAME", "FULLPAGENAMEE", "PAGENAMEE", "BASEPAGENAMEE", "SUBPAGENAMEE",
        "SUBJECTPAGENAMEE", "ARTICLEPAGENAMEE", "TALKPAGENAMEE", "ROOTPAGENAMEE", "NAMESPACE",
        "NAMESPACENUMBER", "SUBJECTSPACE", "ARTICLESPACE", "TALKSPACE", "NAMESPACEE",
        "SUBJECTSPACEE", "ARTICLESPACEE", "TALKSPACEE", "!",
    ],
};
