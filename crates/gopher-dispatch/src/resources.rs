//! Canned replies and link collections.

pub const TABLE_UNFLIP: &str = "┬─┬ノ( º _ ºノ)";

pub const NEWBIE_RESOURCES_INTRO: &str =
    "Here are some resources you should check out if you are learning / new to Go:";

pub const NEWBIE_RESOURCES: &str = "First you should take the language tour: <http://tour.golang.org/>

Then, you should visit:
 - <https://golang.org/doc/code.html> to learn how to organize your Go workspace
 - <https://golang.org/doc/effective_go.html> be more effective at writing Go
 - <https://golang.org/ref/spec> learn more about the language itself
 - <https://golang.org/doc/#articles> a lot more reading material

There are some awesome websites as well:
 - <https://blog.gopheracademy.com> great resources for Gophers in general
 - <http://gotime.fm> awesome weekly podcast of Go awesomeness
 - <https://gobyexample.com> examples of how to do things in Go
 - <http://go-database-sql.org> how to use SQL databases in Go
 - <https://dmitri.shuralyov.com/idiomatic-go> tips on how to write more idiomatic Go code
 - <https://divan.github.io/posts/avoid_gotchas> will help you avoid gotchas in Go

There's also an exhaustive list of videos <http://gophervids.appspot.com> related to Go from various authors.

If you prefer books, you can try these:
 - <http://www.golangbootcamp.com/book>
 - <http://gopl.io/>
 - <https://www.manning.com/books/go-in-action> (if you e-mail @wkennedy at bill@ardanlabs.com you can get a free copy for being part of this Slack)

If you want to learn how to organize your Go project, make sure to read: <https://medium.com/@benbjohnson/standard-package-layout-7cdbc8391fc1#.ds38va3pp>.
Once you are accustomed to the language and syntax, you can read this series of articles for a walkthrough the various standard library packages: <https://medium.com/go-walkthrough>.

Finally, <https://github.com/golang/go/wiki#learning-more-about-go> will give a list of even more resources to learn Go";

pub const RECOMMENDED_CHANNELS_INTRO: &str = "Here is a list of recommended channels:";

pub const HELP_INTRO: &str = "Here's a list of supported commands";

pub const HELP: &str = r#"- "newbie resources" -> get a list of newbie resources
- "newbie resources pvt" -> get a list of newbie resources as a private message
- "recommended channels" -> get a list of recommended channels
- "oss help" -> help the open-source community
- "work with forks" -> how to work with forks of packages
- "idiomatic go" -> learn how to write more idiomatic Go code
- "block forever" -> how to block forever
- "http timeouts" -> tutorial about dealing with timeouts and http
- "database tutorial" -> tutorial about using sql databases
- "package layout" -> learn how to structure your Go package
- "avoid gotchas" -> avoid common gotchas in Go
- "library for <name>" -> search a go package that matches <name>
- "xkcd:<number>" -> link to an xkcd comic
- "flip a coin" -> flip a coin
- "source code" -> location of my source code
- "where do you live?" OR "stack" -> get information about where the tech stack behind @gopher
"#;

pub const OSS_HELP: &str = "Here's a list of projects which could need some help from contributors like you: <https://github.com/corylanou/oss-helpwanted>";

pub const WORK_WITH_FORKS: &str = "<http://blog.sgmansfield.com/2016/06/working-with-forks-in-go/>";

pub const BLOCK_FOREVER: &str = "<http://blog.sgmansfield.com/2016/06/how-to-block-forever-in-go/>";

pub const HTTP_TIMEOUTS: &str = "Here's a blog post which will help with http timeouts in Go: <https://blog.cloudflare.com/the-complete-guide-to-golang-net-http-timeouts/>";

pub const SLICES: &str = "<https://blog.golang.org/go-slices-usage-and-internals>";

pub const DATABASE_TUTORIAL: &str = "<http://go-database-sql.org/>";

pub const PACKAGE_LAYOUT: &str = "This article will explain how to organize your Go packages <https://medium.com/@benbjohnson/standard-package-layout-7cdbc8391fc1#.ds38va3pp>";

pub const IDIOMATIC_GO: &str =
    "Tips on how to write idiomatic Go code <https://dmitri.shuralyov.com/idiomatic-go>";

pub const AVOID_GOTCHAS: &str = "Read this article if you want to understand and avoid common gotchas in Go <https://divan.github.io/posts/avoid_gotchas>";

pub const SOURCE_CODE: &str = "My source code is here <https://github.com/gopheracademy/gopher>";

pub const BOT_LOCATION: &str = "I'm currently living in the Clouds, powered by Google Container Engine (GKE) <https://cloud.google.com/container-engine>. I find my way to home using CircleCI <https://circleci.com> and Kubernetes (k8s) <http://kubernetes.io>. You can find my heart at: <https://github.com/gopheracademy/gopher>.";

pub const XKCD_STANDARDS: &str = "https://xkcd.com/927/";
pub const XKCD_COMPILING: &str = "https://xkcd.com/303/";
pub const XKCD_OPTIMIZATION: &str = "https://xkcd.com/1691/";

pub const GODOC_BASE: &str = "https://godoc.org/";

pub const PLAYGROUND_HINT: &str = "Hello. I've noticed you uploaded a Go file. To enable collaboration and make this easier to get help, please consider using: <https://play.golang.org>. If you wish to not link against the playground, please use \"nolink\" in the message. Thank you.";

pub const WELCOME_HEADER: &str = "Welcome to the Gophers Slack channel.
This Slack is meant to connect gophers from all over the world in a central place.
There is also a forum: https://forum.golangbridge.org, you might want to check it out as well.
We have a few rules that you can see here: http://coc.golangbridge.org.

Here's a list of a few channels you could join:
";

pub const WELCOME_FOOTER: &str = "

If you want more suggestions, type \"recommended channels\".
There are quite a few other channels, depending on your interests or location (we have city / country wide channels).
Just click on the channel list and search for anything that crosses your mind.

To share code, you should use: https://play.golang.org/ as it makes it easy for others to help you.

If you are new to Go and want a copy of the Go In Action book, https://www.manning.com/books/go-in-action, please send an email to @wkennedy at bill@ardanlabs.com

Final thing, #general might be too chatty at times but don't be shy to ask your Go related question.


Now, enjoy the community and have fun.";
