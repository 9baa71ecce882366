//! Shared fixture for unit tests

use crate::builder::LoadOptions;
use crate::graph::Wordnet;

pub const FIXTURE: &str = r###"<?xml version="1.0" encoding="UTF-8"?>
<array-list>
  <relationtypes id="10" name="hiperonimia" type="relacja synsetów" posstr="rzeczownik" shortcut="hiper" display="&lt;x#&gt; jest rodzajem &lt;y#&gt;" reverse="11"/>
  <relationtypes id="11" name="hiponimia" type="relacja synsetów" posstr="rzeczownik" shortcut="hipo"/>
  <relationtypes id="20" name="antonimia" type="relacja leksykalna" shortcut="ant" reverse="20"/>
  <relationtypes id="30" name="hypernym" type="relacja synsetów" posstr="rzeczownik pwn" shortcut="hyper" reverse="31"/>
  <relationtypes id="31" name="hyponym" type="relacja synsetów" posstr="rzeczownik pwn" shortcut="hypo" reverse="30"/>
  <relationtypes id="40" name="typ" type="relacja synsetów" shortcut="typ"/>
  <relationtypes id="50" name="Hiper_plWN-PWN" type="relacja synsetów" parent="10" reverse="99" shortcut="hiper_pl_en"/>
  <lexical-unit id="1" name="kot" pos="rzeczownik" tagcount="40" domain="zw" desc="" variant="1"/>
  <lexical-unit id="2" name="kot" pos="rzeczownik" domain="zw" desc="##D: samiec. [##P: Kot przyszedł.]" variant="2"/>
  <lexical-unit id="3" name="zwierzę" pos="rzeczownik" domain="zw" desc="istota żywa" variant="1"/>
  <lexical-unit id="4" name="ssak" pos="rzeczownik" domain="zw" desc="##D: ssak&#10;kręgowy" variant="1"/>
  <lexical-unit id="5" name="cat" pos="rzeczownik pwn" domain="zw" variant="1"/>
  <lexical-unit id="6" name="animal" pos="rzeczownik pwn" domain="zw" variant="1"/>
  <lexical-unit id="7" name="sierota" pos="rzeczownik" domain="os" variant="1"/>
  <lexical-unit id="8" name="kot" pos="rzeczownik pwn" domain="zw" variant="3"/>
  <lexical-unit id="9" name="byt" pos="rzeczownik" domain="bhp" variant="1"/>
  <lexical-unit id="10" name="pies" pos="rzeczownik" domain="zw" variant="1"/>
  <lexical-unit id="11" name="pies" pos="rzeczownik" domain="os" variant="2"/>
  <lexical-unit id="12" name="istota" pos="rzeczownik" domain="bhp" variant="1"/>
  <lexical-unit id="13" name="Kot" pos="rzeczownik" domain="os" variant="3"/>
  <synset id="100" split="1" abstract="false" definition="kot domowy"><unit-id>1</unit-id></synset>
  <synset id="101" split="1" abstract="false"><unit-id>2</unit-id></synset>
  <synset id="102" split="1" abstract="false" desc="##D: organizm."><unit-id>3</unit-id></synset>
  <synset id="103" split="1" abstract="false" definition="brak danych"><unit-id>4</unit-id></synset>
  <synset id="104" split="1" abstract="false"><unit-id>5</unit-id><unit-id>8</unit-id></synset>
  <synset id="105" split="1" abstract="false"><unit-id>6</unit-id></synset>
  <synset id="106" split="1" abstract="false"><unit-id>13</unit-id></synset>
  <synset id="107" split="1" abstract="true"><unit-id>9</unit-id><unit-id>999</unit-id><unit-id>12</unit-id></synset>
  <synset id="108" split="1" abstract="false"/>
  <synset id="109" split="1" abstract="false"><unit-id>12</unit-id></synset>
  <synset id="110" split="1" abstract="false"><unit-id>10</unit-id></synset>
  <synset id="111" split="1" abstract="false"><unit-id>11</unit-id></synset>
  <synsetrelations parent="100" relation="10" child="103"/>
  <synsetrelations parent="100" relation="40" child="107"/>
  <synsetrelations parent="100" relation="50" child="104"/>
  <synsetrelations parent="103" relation="10" child="102"/>
  <synsetrelations parent="103" relation="11" child="100"/>
  <synsetrelations parent="104" relation="30" child="105"/>
  <synsetrelations parent="105" relation="31" child="104"/>
  <synsetrelations parent="105" relation="10" child="108"/>
  <synsetrelations parent="106" relation="10" child="106"/>
  <synsetrelations parent="110" relation="10" child="111"/>
  <synsetrelations parent="111" relation="10" child="110"/>
  <lexicalrelations parent="1" relation="20" child="2"/>
  <lexicalrelations parent="1" relation="20" child="2"/>
  <lexicalrelations parent="3" relation="20" child="4"/>
</array-list>
"###;

pub const SENTIMENT: &str = "lemma,variant,pos,charge,emotions,valuations,polarity,example1,example2
kot,1,rzeczownik,amb,radość,piękno,+ m,Kot mruczy.,NULL
";

pub fn wordnet() -> Wordnet {
    wordnet_with(LoadOptions::default())
}

pub fn wordnet_with(options: LoadOptions) -> Wordnet {
    Wordnet::load(FIXTURE.as_bytes(), &options).unwrap()
}

pub fn wordnet_with_sentiment() -> Wordnet {
    Wordnet::load_with_sentiment(
        FIXTURE.as_bytes(),
        SENTIMENT.as_bytes(),
        &LoadOptions::default(),
    )
    .unwrap()
}
